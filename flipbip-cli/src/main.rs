//! FlipBip command line
//!
//! Generates, imports and views BIP-44 wallets for BTC, ETH, DOGE and any
//! coin added through the configuration file.

mod commands;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keystore file, overrides the configured path
    #[arg(long, global = true)]
    keystore: Option<PathBuf>,

    /// Keystore password
    #[arg(long, global = true, env = "FLIPBIP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print machine readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::Settings::load(cli.config, cli.keystore, cli.password, cli.json)?;
    cli.command.run(&settings)
}
