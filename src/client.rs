use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, WIRE_DATE_FORMAT};
use crate::error::{MarketDataError, Result};
use crate::types::{
    DemographicCategory, DemographicValue, FinancialSnapshot, ListingsSnapshot, LocationType,
    Market, MetricFamily, TimeSeriesPoint, TimeSeriesRequest,
};

/// Authenticated read-only client for the market-data API. Holds the
/// credential and base URL fixed for its lifetime; every operation is a
/// single stateless GET.
#[derive(Debug)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        if cfg.api_key.trim().is_empty() {
            return Err(MarketDataError::Authentication(
                "credential is empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        // The service expects the raw key, not a Bearer-prefixed scheme.
        let auth = HeaderValue::from_str(&cfg.api_key).map_err(|_| {
            MarketDataError::Authentication("credential contains invalid header bytes".to_string())
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(MarketDataError::from)?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full market catalog, optionally filtered server-side by
    /// location type.
    pub async fn list_markets(&self, filter: Option<LocationType>) -> Result<Vec<Market>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(lt) = filter {
            query.push(("location_type", lt.as_query_param().to_string()));
        }
        let body = self.get_json("/v1/place/markets", &query, None).await?;
        let markets = parse_markets(&body)?;
        debug!("catalog fetched: {} markets", markets.len());
        Ok(markets)
    }

    /// Fetch one metric family's history for a market, sorted ascending by
    /// date and clamped to the request's inclusive bounds.
    pub async fn fetch_series(&self, req: &TimeSeriesRequest) -> Result<Vec<TimeSeriesPoint>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = req.start {
            query.push(("start", start.format(WIRE_DATE_FORMAT).to_string()));
        }
        if let Some(end) = req.end {
            query.push(("end", end.format(WIRE_DATE_FORMAT).to_string()));
        }
        let body = self
            .get_json(&req.metric.path(req.parcl_id), &query, Some(req.parcl_id))
            .await?;
        let points = parse_series(&body, req.metric)?;
        if points.is_empty() {
            return Err(MarketDataError::EmptySeries {
                parcl_id: req.parcl_id,
                metric: req.metric,
            });
        }
        Ok(clamp_bounds(points, req.start, req.end))
    }

    /// Fetch the current price-feed value for one market. This is a scalar
    /// snapshot endpoint, not a series.
    pub async fn fetch_latest_price(&self, parcl_id: u64) -> Result<f64> {
        let query = [("parcl_id", parcl_id.to_string())];
        let body = self.get_json("/v1/price_feed/latest", &query, Some(parcl_id)).await?;
        parse_latest_price(&body, parcl_id)
    }

    /// Fetch the current risk/return snapshot for one market.
    pub async fn fetch_financials(&self, parcl_id: u64) -> Result<FinancialSnapshot> {
        let path = format!("/v1/financials/{parcl_id}/current");
        let body = self.get_json(&path, &[], Some(parcl_id)).await?;
        serde_json::from_value(body)
            .map_err(|e| MarketDataError::UnexpectedResponse(format!("financials snapshot: {e}")))
    }

    /// Fetch the current active-listings counts for one market.
    pub async fn fetch_current_listings(&self, parcl_id: u64) -> Result<ListingsSnapshot> {
        let path = format!("/v1/listings/{parcl_id}/current");
        let body = self.get_json(&path, &[], Some(parcl_id)).await?;
        let payload = extract_payload(&body, "listings")?;
        serde_json::from_value(payload.clone())
            .map_err(|e| MarketDataError::UnexpectedResponse(format!("listings snapshot: {e}")))
    }

    /// Fetch one census category for a market. The payload key matches the
    /// requested category.
    pub async fn fetch_demographics(
        &self,
        parcl_id: u64,
        category: DemographicCategory,
    ) -> Result<Vec<DemographicValue>> {
        let path = format!("/v1/place/{parcl_id}/demographics");
        let query = [("category", category.as_query_param().to_string())];
        let body = self.get_json(&path, &query, Some(parcl_id)).await?;
        let payload = extract_payload(&body, category.payload_key())?;
        serde_json::from_value(payload.clone())
            .map_err(|e| MarketDataError::UnexpectedResponse(format!("{category} payload: {e}")))
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        parcl_id: Option<u64>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");
        let resp = self.http.get(&url).query(query).send().await?;
        if let Some(err) = status_error(resp.status(), path, parcl_id) {
            return Err(err);
        }
        Ok(resp.json::<Value>().await?)
    }
}

/// Map a response status to the error it should surface, if any.
/// A 404 on a market-scoped path means the service has no data for that
/// id; on the catalog path there is no id to blame, so it stays an
/// unexpected response.
fn status_error(status: StatusCode, path: &str, parcl_id: Option<u64>) -> Option<MarketDataError> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Some(MarketDataError::Authentication(format!(
                "service rejected credential (HTTP {status})"
            )))
        }
        StatusCode::NOT_FOUND => match parcl_id {
            Some(parcl_id) => Some(MarketDataError::NotFound { parcl_id }),
            None => Some(MarketDataError::UnexpectedResponse(format!(
                "service returned HTTP {status} for {path}"
            ))),
        },
        s if !s.is_success() => Some(MarketDataError::UnexpectedResponse(format!(
            "service returned HTTP {status} for {path}"
        ))),
        _ => None,
    }
}

/// Resolve an id against an already-fetched catalog. No network call.
/// A duplicated id is surfaced as `AmbiguousId` rather than resolved to
/// whichever entry happens to come first.
pub fn find_market(markets: &[Market], parcl_id: u64) -> Result<&Market> {
    let mut matches = markets.iter().filter(|m| m.parcl_id == parcl_id);
    let first = matches.next().ok_or(MarketDataError::NotFound { parcl_id })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(MarketDataError::AmbiguousId {
            parcl_id,
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Parse the catalog body: a bare JSON array of market objects.
pub fn parse_markets(body: &Value) -> Result<Vec<Market>> {
    if !body.is_array() {
        return Err(MarketDataError::UnexpectedResponse(
            "markets response was not an array".to_string(),
        ));
    }
    serde_json::from_value(body.clone())
        .map_err(|e| MarketDataError::UnexpectedResponse(format!("market object: {e}")))
}

/// Extract a history payload and normalize it: pull the metric family's
/// top-level key, read each item's date and value field, sort ascending by
/// date. The upstream does not guarantee order.
pub fn parse_series(body: &Value, metric: MetricFamily) -> Result<Vec<TimeSeriesPoint>> {
    let payload = extract_payload(body, metric.payload_key())?;
    let items = payload.as_array().ok_or_else(|| {
        MarketDataError::UnexpectedResponse(format!(
            "`{}` payload was not an array",
            metric.payload_key()
        ))
    })?;

    let mut points = Vec::with_capacity(items.len());
    for item in items {
        let date = item
            .get("date")
            .and_then(|d| d.as_str())
            .and_then(parse_wire_date)
            .ok_or_else(|| {
                MarketDataError::UnexpectedResponse(format!(
                    "`{}` item missing parseable `date`",
                    metric.payload_key()
                ))
            })?;
        let value = item
            .get(metric.value_field())
            .and_then(json_number)
            .ok_or_else(|| {
                MarketDataError::UnexpectedResponse(format!(
                    "`{}` item missing numeric `{}`",
                    metric.payload_key(),
                    metric.value_field()
                ))
            })?;
        points.push(TimeSeriesPoint { date, value });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// Keep only points inside the inclusive [start, end] range. Open ends
/// pass everything through.
pub fn clamp_bounds(
    points: Vec<TimeSeriesPoint>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<TimeSeriesPoint> {
    points
        .into_iter()
        .filter(|p| start.is_none_or(|s| p.date >= s) && end.is_none_or(|e| p.date <= e))
        .collect()
}

/// Extract the latest-price scalar from the `price_feeds` map, which is
/// keyed by the id's decimal string.
pub fn parse_latest_price(body: &Value, parcl_id: u64) -> Result<f64> {
    let feeds = extract_payload(body, "price_feeds")?;
    let entry = feeds
        .get(parcl_id.to_string())
        .ok_or(MarketDataError::NotFound { parcl_id })?;
    entry.get("price").and_then(json_number).ok_or_else(|| {
        MarketDataError::UnexpectedResponse(format!(
            "price_feeds entry for {parcl_id} missing numeric `price`"
        ))
    })
}

/// Re-serialize a normalized series back into its wire shape, top-level
/// key included. Used to verify round-trip compatibility.
pub fn series_to_wire(metric: MetricFamily, points: &[TimeSeriesPoint]) -> Value {
    let items: Vec<Value> = points
        .iter()
        .map(|p| {
            serde_json::json!({
                "date": p.date.format("%Y-%m-%d").to_string(),
                metric.value_field(): p.value,
            })
        })
        .collect();
    serde_json::json!({ metric.payload_key(): items })
}

fn extract_payload<'a>(body: &'a Value, key: &str) -> Result<&'a Value> {
    body.get(key).ok_or_else(|| {
        MarketDataError::UnexpectedResponse(format!("response missing `{key}` key"))
    })
}

/// Accept both JSON numbers and numeric strings; the service is not
/// consistent about which it sends.
fn json_number(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
