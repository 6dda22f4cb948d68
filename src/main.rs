use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use parcl_markets::{find_market, Config, MarketDataClient, MarketDataError, Result};

/// Case-Shiller metro markets — same set the upstream uses for its
/// risk-vs-return composite.
const CASE_SHILLER_IDS: &[u64] = &[
    2900336, // San Francisco
    2900078, // Los Angeles
    2900187, // New York
    2900245, // Phoenix
    2900332, // San Diego
    2900353, // Seattle
    2899845, // Chicago
    2900128, // Miami
    2899625, // Boston
    2899750, // Denver
    2887280, // Atlanta
    2900049, // Las Vegas
    2900475, // Washington DC
    2900417, // Tampa
    2900266, // Portland
    2900137, // Minneapolis
    2899841, // Charlotte
    2899753, // Detroit
    2899654, // Cleveland
];

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

/// Risk-vs-return report: one row per market with CAGR, annualized
/// volatility, and the latest price-feed value. Markets are fetched
/// strictly in list order, one at a time.
async fn run(cfg: Config) -> Result<()> {
    let client = MarketDataClient::new(&cfg)?;

    let markets = client.list_markets(None).await?;
    info!("catalog loaded: {} markets", markets.len());

    println!(
        "{:<28} {:<5} {:>8} {:>8} {:>10}",
        "market", "state", "cagr", "vol", "price"
    );

    for &parcl_id in CASE_SHILLER_IDS {
        // Resolve against the catalog before touching the per-market endpoints;
        // an unknown id should fail here, not as a confusing fetch error.
        let market = match find_market(&markets, parcl_id) {
            Ok(m) => m,
            Err(e @ MarketDataError::NotFound { .. }) => {
                warn!("skipping {parcl_id}: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };

        let financials = client.fetch_financials(parcl_id).await?;
        let last_price = client.fetch_latest_price(parcl_id).await?;

        println!(
            "{:<28} {:<5} {:>7.1}% {:>7.1}% {:>10.2}",
            market.name,
            market.state.as_deref().unwrap_or("-"),
            financials.cagr * 100.0,
            financials.annual_volatility * 100.0,
            last_price,
        );
    }

    Ok(())
}
