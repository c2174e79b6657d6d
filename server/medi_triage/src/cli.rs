use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "medi-triage",
    version,
    about = "Vital-sign risk triage web service",
    long_about = "medi-triage serves a form that accepts ten patient vital signs,\n\
        validates them, and reports Low / Medium / High risk.\n\n\
        EXAMPLES:\n\
        \n  medi-triage                                   Heuristic scoring on 127.0.0.1:8720\n\
        \n  medi-triage --config triage.toml              Load settings from a TOML file\n\
        \n  medi-triage --strategy classifier --model models/risk.json"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Listen address, overrides [server].addr
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<SocketAddr>,

    /// Scoring strategy (heuristic, classifier)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Classifier artifact, overrides [scoring].model_path
    #[arg(long = "model", value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Validation mode (collect_all, fail_fast)
    #[arg(long, value_name = "MODE")]
    pub validation: Option<String>,

    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
