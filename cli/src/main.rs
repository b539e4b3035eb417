//! Entry point: loads a JSON pool/token snapshot fixture from disk, scans it
//! for the best triangular arbitrage route, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use cosmoarb_arbitrage_core::find_opportunities;
use cosmoarb_decimal::Precision;
use cosmoarb_types::{Borrowable, GasMultipliers, PoolsSnapshot, TokensConfig, TradeSizes};
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Triangular arbitrage route scanner")]
struct Cli {
    /// Path to a JSON fixture describing pools, tokens, borrowables, and trade sizes.
    #[arg(long, env = "SNAPSHOT_PATH", default_value = "snapshot.json")]
    snapshot_path: std::path::PathBuf,

    /// Maximum number of hops a route may take.
    #[arg(long, env = "MAX_HOPS")]
    max_hops: Option<u32>,

    /// Minimum profit, in raw units of the borrowed token, a plan must target.
    #[arg(long, env = "MIN_PROFIT_RAW")]
    min_profit_raw: Option<u128>,
}

struct EngineConfig {
    max_hops: u32,
    min_profit_raw: u128,
    rpc_url: String,
    indexer_url: String,
}

impl EngineConfig {
    fn load(cli: &Cli) -> Self {
        let max_hops = cli
            .max_hops
            .unwrap_or_else(|| std::env::var("MAX_HOPS").ok().and_then(|v| v.parse().ok()).unwrap_or(5));
        let min_profit_raw = cli
            .min_profit_raw
            .unwrap_or_else(|| std::env::var("MIN_PROFIT_RAW").ok().and_then(|v| v.parse().ok()).unwrap_or(0));
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| "https://rpc.cosmoarb.example".to_string());
        let indexer_url =
            std::env::var("INDEXER_URL").unwrap_or_else(|_| "https://indexer.cosmoarb.example".to_string());
        Self { max_hops, min_profit_raw, rpc_url, indexer_url }
    }
}

/// The on-disk shape a pool/token snapshot fixture is loaded from. Real
/// deployments would fill this in from `cosmoarb-adapters`' collaborator
/// traits instead of a file.
#[derive(Debug, Deserialize)]
struct SnapshotFixture {
    pools: PoolsSnapshot,
    tokens: TokensConfig,
    borrowables: Vec<Borrowable>,
    trade_sizes: TradeSizes,
    gas: GasMultipliers,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            std::env::set_var("RUST_LOG", level);
        }
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = EngineConfig::load(&cli);
    info!(
        rpc_url = %config.rpc_url,
        indexer_url = %config.indexer_url,
        max_hops = config.max_hops,
        min_profit_raw = config.min_profit_raw,
        "starting scan"
    );

    let raw = std::fs::read_to_string(&cli.snapshot_path)
        .with_context(|| format!("reading snapshot fixture at {}", cli.snapshot_path.display()))?;
    let fixture: SnapshotFixture = serde_json::from_str(&raw).context("parsing snapshot fixture")?;

    let opportunity = find_opportunities(
        &fixture.borrowables,
        &fixture.trade_sizes,
        &fixture.pools,
        &fixture.tokens,
        &fixture.gas,
        config.max_hops,
        config.min_profit_raw,
        Precision::new(30),
    )
    .context("scanning snapshot for arbitrage opportunities")?;

    match opportunity {
        Some(found) => {
            println!("best route: {:#?}", found.route);
            println!("trade plan: {:#?}", found.plan);
        }
        None => println!("no profitable route found"),
    }

    Ok(())
}
