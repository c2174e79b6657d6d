//! Service configuration: TOML file plus command-line overrides.

use crate::cli::Cli;
use crate::error::ConfigError;
use medi_risk::{ScorerConfig, ScoringStrategy};
use medi_vitals::ValidationMode;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8720";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub scoring: ScorerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8720))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

impl TriageConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a config file. A relative `model_path` is resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(dir) = path.parent() {
            if let Some(model) = config.scoring.model_path.take() {
                config.scoring.model_path = Some(if model.is_relative() {
                    dir.join(model)
                } else {
                    model
                });
            }
        }
        Ok(config)
    }

    /// Config file (if any) with command-line flags applied on top.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli)?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(addr) = cli.addr {
            self.server.addr = addr;
        }
        if let Some(strategy) = &cli.strategy {
            self.scoring.strategy = strategy
                .parse::<ScoringStrategy>()
                .map_err(ConfigError::Override)?;
        }
        if let Some(model) = &cli.model {
            self.scoring.model_path = Some(model.clone());
        }
        if let Some(mode) = &cli.validation {
            self.validation.mode = mode.parse::<ValidationMode>().map_err(ConfigError::Override)?;
        }
        Ok(())
    }
}
