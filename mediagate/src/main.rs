use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mediagate_core::cli;
use mediagate_core::conf::{DevProxyConfig, GatekeeperConfig};
use mediagate_core::logging::init_logging;
use mediagate_core::server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mediagate",
    version,
    about = "mediagate: edge gatekeeper for protected CDN media"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the local dev proxy in front of the CDN (default)
    Run,

    /// Handle a single CDN viewer-request event and print the result
    Handle {
        /// Path to the event JSON (stdin when omitted)
        #[arg(long)]
        event: Option<PathBuf>,
    },

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Config { cmd }) => cli::config::run(cmd),
        Some(Command::Handle { event }) => handle(event),
        Some(Command::Run) | None => run(),
    };

    if let Err(e) = result {
        eprintln!("mediagate error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = GatekeeperConfig::from_env().context("failed to load gatekeeper config")?;
    let proxy = DevProxyConfig::from_env().context("failed to load dev proxy config")?;

    init_logging(cfg.disable_logging);

    server::run(cfg, proxy)
}

fn handle(event: Option<PathBuf>) -> Result<()> {
    let cfg = GatekeeperConfig::from_env().context("failed to load gatekeeper config")?;

    init_logging(cfg.disable_logging);

    cli::handle::run(&cfg, event.as_deref())
}
