//! RecLedger reference host
//!
//! Supplies caller identity and block height, replays a call script against
//! the ledger, and prints one JSON result per call.

mod replay;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use recledger_core::Ledger;
use recledger_shared::types::AccountId;
use recledger_shared::{AppConfig, config::LoggingConfig};

use crate::replay::{BlockClock, Replay};

#[derive(Parser)]
#[command(name = "recledger")]
#[command(about = "Replay REC ledger call scripts", long_about = None)]
struct Cli {
    /// JSON-lines call script (reads stdin when omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Identity allowed to issue certificates (overrides configuration)
    #[arg(short, long)]
    administrator: Option<String>,

    /// Print the final ledger state after the replay
    #[arg(long)]
    dump_state: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());

    // stdout carries call results, so logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            logging
                .json
                .then(|| fmt::layer().json().with_writer(io::stderr)),
        )
        .with((!logging.json).then(|| fmt::layer().with_writer(io::stderr)))
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let administrator = cli
        .administrator
        .or(config.ledger.administrator)
        .filter(|admin| !admin.is_empty())
        .context("no administrator configured (set ledger.administrator or pass --administrator)")?;
    let ledger = Ledger::new(AccountId::new(administrator));
    info!(
        administrator = %ledger.certificates().administrator(),
        "ledger initialized"
    );

    let ledger = Arc::new(Mutex::new(ledger));
    let clock = BlockClock::new(config.host.start_height, config.host.blocks_per_call);
    let mut replay = Replay::new(Arc::clone(&ledger), clock);

    let stdout = io::stdout();
    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            replay.run(BufReader::new(file), stdout.lock())?;
        }
        None => {
            replay.run(io::stdin().lock(), stdout.lock())?;
        }
    }

    if cli.dump_state {
        let ledger = ledger
            .lock()
            .map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
        serde_json::to_writer_pretty(stdout.lock(), &ledger.snapshot())?;
        println!();
    }

    Ok(())
}
