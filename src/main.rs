mod cli;
mod shell;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use swan_registry::config::Config;
use swan_registry::controller::{ClientOptions, DeviceRegistryClient, Outcome};
use swan_registry::observability::Metrics;
use swan_registry::page::{Page, TerminalPage};
use swan_registry::registry::HttpRegistry;
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, AnyError> {
    // Logs go to stderr; stdout belongs to the page.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    tracing::debug!(base_url = %config.server.base_url, "Configuration loaded");

    let registry = Arc::new(HttpRegistry::new(&config.server.base_url, &config.http)?);
    tracing::debug!(base_url = %registry.base_url(), "Registry client ready");

    let metrics = Arc::new(Metrics::new());

    let assume_yes = matches!(&cli.command, Commands::Delete(args) if args.yes);
    let page = Arc::new(TerminalPage::stdio(config.form.action.clone()).assume_yes(assume_yes));
    let client = DeviceRegistryClient::new(
        registry,
        Page::from_single(page.clone()),
        ClientOptions::from(&config),
    )
    .with_metrics(metrics.clone());

    let outcome = match cli.command {
        Commands::Add(args) => {
            let mut fields = vec![("imei".to_string(), args.imei)];
            fields.extend(args.fields);
            page.fill(fields);
            client.submit_form().await
        }
        Commands::Delete(args) => client.delete_device(&args.imei).await,
        Commands::Show(args) => client.show_device_details(&args.imei).await,
        Commands::List => client.refresh_list().await,
        Commands::Shell => {
            shell::run(&client, &page).await;
            Outcome::Done
        }
    };

    tracing::debug!(metrics = ?metrics.snapshot(), "Session finished");

    Ok(match outcome {
        Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
        Outcome::Failed | Outcome::Busy | Outcome::Stale => ExitCode::FAILURE,
    })
}
