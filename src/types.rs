use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// One geographic market from the `/v1/place/markets` catalog. Field names
/// match the wire contract exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub parcl_id: u64,
    pub name: String,
    pub state: Option<String>,
    pub location_type: LocationType,
    pub census_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationType {
    City,
    County,
    Msa,
    Metro,
    /// Granularity the catalog may grow that we don't model yet. Carries
    /// the raw wire value so re-serializing reproduces it exactly.
    Other(String),
}

impl LocationType {
    /// Value for the catalog's `location_type` query param.
    pub fn as_query_param(&self) -> &str {
        match self {
            LocationType::City => "CITY",
            LocationType::County => "COUNTY",
            LocationType::Msa => "MSA",
            LocationType::Metro => "METRO",
            LocationType::Other(raw) => raw,
        }
    }
}

impl From<String> for LocationType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CITY" => LocationType::City,
            "COUNTY" => LocationType::County,
            "MSA" => LocationType::Msa,
            "METRO" => LocationType::Metro,
            _ => LocationType::Other(s),
        }
    }
}

impl From<LocationType> for String {
    fn from(lt: LocationType) -> Self {
        lt.as_query_param().to_string()
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_param())
    }
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// One (date, value) observation for a single market and metric family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Input parameters for one `fetch_series` call. Bounds are inclusive
/// calendar dates; `None` leaves that end of the range open.
#[derive(Debug, Clone)]
pub struct TimeSeriesRequest {
    pub parcl_id: u64,
    pub metric: MetricFamily,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TimeSeriesRequest {
    pub fn new(parcl_id: u64, metric: MetricFamily) -> Self {
        Self { parcl_id, metric, start: None, end: None }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Which history endpoint a series request hits, and which wire fields it
/// maps onto. Payload keys and value fields are the upstream's fixed
/// contract, not a local naming choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricFamily {
    /// Smoothed home-price index.
    PriceFeed,
    /// 30-day sales counts.
    Sales,
    /// Active inventory for one unit type.
    Inventory(UnitType),
    /// How quickly available inventory sells.
    AbsorptionRate,
    /// Annualized price-feed volatility.
    Volatility,
    /// Annual volatility from the financial history endpoint — distinct
    /// from `Volatility`, with its own path and payload shape.
    AnnualVolatility,
}

impl MetricFamily {
    pub fn path(&self, parcl_id: u64) -> String {
        match self {
            MetricFamily::PriceFeed => format!("/v1/price_feed/{parcl_id}/history"),
            MetricFamily::Sales => format!("/v1/sales/{parcl_id}/history"),
            MetricFamily::Inventory(_) => format!("/v1/inventory/{parcl_id}/history"),
            MetricFamily::AbsorptionRate => format!("/v1/absorption/{parcl_id}/history"),
            MetricFamily::Volatility => format!("/v1/financials/{parcl_id}/volatility"),
            MetricFamily::AnnualVolatility => format!("/v1/financials/{parcl_id}/history"),
        }
    }

    /// Top-level key the endpoint nests its payload under.
    pub fn payload_key(&self) -> &'static str {
        match self {
            MetricFamily::PriceFeed => "price_feed",
            MetricFamily::Sales => "historical_sales",
            MetricFamily::Inventory(_) => "historical_inventory",
            MetricFamily::AbsorptionRate => "historical_absorption_rate",
            MetricFamily::Volatility => "volatility",
            MetricFamily::AnnualVolatility => "metrics",
        }
    }

    /// Field holding the metric value inside each payload item.
    pub fn value_field(&self) -> &'static str {
        match self {
            MetricFamily::PriceFeed => "price",
            MetricFamily::Sales => "sales_30_day",
            MetricFamily::Inventory(unit) => unit.field(),
            MetricFamily::AbsorptionRate => "absorption_rate",
            MetricFamily::Volatility => "volatility",
            MetricFamily::AnnualVolatility => "annual_volatility",
        }
    }
}

impl std::fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MetricFamily::PriceFeed => "price_feed",
            MetricFamily::Sales => "sales",
            MetricFamily::Inventory(unit) => return write!(f, "inventory.{}", unit.field()),
            MetricFamily::AbsorptionRate => "absorption_rate",
            MetricFamily::Volatility => "volatility",
            MetricFamily::AnnualVolatility => "annual_volatility",
        };
        write!(f, "{s}")
    }
}

/// Unit-type columns of the inventory history payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitType {
    Condo,
    SingleFamily,
    Townhouse,
    Total,
}

impl UnitType {
    pub fn field(&self) -> &'static str {
        match self {
            UnitType::Condo => "condo",
            UnitType::SingleFamily => "single_family",
            UnitType::Townhouse => "townhouse",
            UnitType::Total => "total_units",
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Current risk/return snapshot from `/v1/financials/{id}/current`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub cagr: f64,
    // The upstream misspells this key; keep their spelling on the wire.
    #[serde(rename = "annual_volatitily")]
    pub annual_volatility: f64,
}

/// Current listings counts from `/v1/listings/{id}/current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingsSnapshot {
    pub date: NaiveDate,
    pub listings_30_day: u64,
}

// ---------------------------------------------------------------------------
// Demographics
// ---------------------------------------------------------------------------

/// Census category for `/v1/place/{id}/demographics`. The payload key
/// matches the requested category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicCategory {
    Population,
    Income,
}

impl DemographicCategory {
    pub fn as_query_param(&self) -> &'static str {
        match self {
            DemographicCategory::Population => "population",
            DemographicCategory::Income => "income",
        }
    }

    pub fn payload_key(&self) -> &'static str {
        self.as_query_param()
    }
}

impl std::fmt::Display for DemographicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_param())
    }
}

/// One census observation, e.g. `{year: 2021, variable: "pop_total", value: …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicValue {
    pub year: i32,
    pub variable: String,
    pub value: f64,
}
