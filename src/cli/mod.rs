//! Command-line interface definitions.

pub mod output;

mod queue;
mod show;
mod submit;
mod worker;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::app::Services;
use crate::config::Config;
use crate::error::Result;

/// Riskline - trade booking, position and P&L engine.
#[derive(Parser, Debug)]
#[command(name = "riskline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "riskline.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Book a trade and enqueue it for processing
    Submit(SubmitArgs),

    /// Run the trade-processing worker (foreground)
    Worker,

    /// List booked trades, newest first
    Trades(TradesArgs),

    /// Show position snapshots per instrument
    Positions,

    /// List P&L ledger entries, newest first
    Pnl(PnlArgs),

    /// Show queue depth and dead letters
    Queue,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Instrument symbol, e.g. AAPL
    #[arg(long)]
    pub instrument: String,

    /// Order side: buy or sell
    #[arg(long)]
    pub side: String,

    /// Number of units, must be positive
    #[arg(long)]
    pub quantity: i64,

    /// Price at order time
    #[arg(long)]
    pub price: Decimal,
}

#[derive(Args, Debug)]
pub struct TradesArgs {
    #[arg(long, default_value_t = 50)]
    pub limit: i64,
}

#[derive(Args, Debug)]
pub struct PnlArgs {
    #[arg(long, default_value_t = 200)]
    pub limit: i64,
}

/// Dispatch a parsed command.
pub async fn run(command: Commands, config: &Config) -> Result<()> {
    let services = Services::connect(config)?;

    match command {
        Commands::Submit(args) => submit::run(&args, &services).await,
        Commands::Worker => worker::run(config, &services).await,
        Commands::Trades(args) => show::trades(&services, args.limit).await,
        Commands::Positions => show::positions(&services).await,
        Commands::Pnl(args) => show::pnl(&services, args.limit).await,
        Commands::Queue => queue::run(&services).await,
    }
}
