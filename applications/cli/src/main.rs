/// Kyofu - music catalog reconciliation
use clap::Parser;
use kyofu_cli::{commands, Cli, CliConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let library = cli.library_name().map(str::to_owned);
    match commands::run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match library {
                Some(library) => {
                    tracing::error!("Command failed: library={} error={:#}", library, e)
                }
                None => tracing::error!("Command failed: error={:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> kyofu_cli::Result<CliConfig> {
    let config = CliConfig::load(cli.config.as_deref())?.with_database_url(cli.database_url.clone());
    config.validate()?;
    Ok(config)
}
