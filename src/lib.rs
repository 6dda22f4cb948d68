//! Typed client for a real-estate market-data API: market catalog lookups,
//! price-feed / sales / inventory / absorption / volatility histories, and
//! current financial, listings, and price snapshots, plus a small stats
//! layer for the usual chart prep (percent change, rolling mean,
//! correlation).

pub mod client;
pub mod config;
pub mod error;
pub mod stats;
pub mod types;

pub use client::{find_market, MarketDataClient};
pub use config::Config;
pub use error::{MarketDataError, Result};
pub use types::{
    DemographicCategory, DemographicValue, FinancialSnapshot, ListingsSnapshot, LocationType,
    Market, MetricFamily, TimeSeriesPoint, TimeSeriesRequest, UnitType,
};
