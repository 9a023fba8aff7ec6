use clap::Parser;
use tracing::error;

use riskline::cli::{self, Cli};
use riskline::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();

    if let Err(e) = cli::run(cli.command, &config).await {
        error!(error = %e, "Command failed");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
