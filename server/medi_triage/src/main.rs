use clap::Parser;
use medi_triage::cli::Cli;
use medi_triage::{app, AppState, ServerError, TriageConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let config = TriageConfig::from_cli(&cli)?;
    log::debug!("effective config: {config:?}");

    let state = AppState::from_config(&config)?;
    log::info!(
        "scoring with {} strategy, {:?} validation",
        state.scorer.name(),
        config.validation.mode
    );

    let listener = tokio::net::TcpListener::bind(config.server.addr).await?;
    log::info!("medi-triage listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("medi-triage stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
