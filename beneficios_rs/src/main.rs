use beneficios_rs::cli::{Cli, CommandStatus};
use beneficios_rs::terminal::TerminalAlerts;
use beneficios_rs::{BeneficioBackend, BeneficiosClient};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; RUST_LOG raises verbosity.
    beneficios_core::o11y::init_from_env()?;
    let cli = Cli::parse();

    let client = BeneficiosClient::from_config(&cli.client_config())?;
    tracing::debug!(base_url = client.base_url(), "client ready");

    let command = cli.command.unwrap_or_default();
    let backend: Arc<dyn BeneficioBackend> = Arc::new(client.beneficios());
    let alerts = Arc::new(TerminalAlerts::new(command.assume_yes()));

    let status =
        beneficios_rs::cli::run(command, backend, alerts, &mut std::io::stdout()).await?;
    Ok(match status {
        CommandStatus::Ok => ExitCode::SUCCESS,
        CommandStatus::Failed => ExitCode::FAILURE,
    })
}
