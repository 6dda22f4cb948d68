//! Presentation-layer statistics over fetched series. These sit on top of
//! the client, never inside it; a chart script picks what it needs.

use std::collections::BTreeMap;

use crate::types::TimeSeriesPoint;

/// Cumulative percent change of each point relative to the first point,
/// expressed as a fraction (0.05 = +5%). Empty input and a zero first
/// value both yield an empty result.
pub fn pct_change_from_start(points: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    if first.value == 0.0 {
        return Vec::new();
    }
    points
        .iter()
        .map(|p| TimeSeriesPoint {
            date: p.date,
            value: p.value / first.value - 1.0,
        })
        .collect()
}

/// Trailing rolling mean. The first `window - 1` points have no full
/// window and are dropped, matching a pandas `rolling(window).mean()`
/// with the leading NaNs removed.
pub fn rolling_mean(points: &[TimeSeriesPoint], window: usize) -> Vec<TimeSeriesPoint> {
    if window == 0 || points.len() < window {
        return Vec::new();
    }
    points
        .windows(window)
        .map(|w| TimeSeriesPoint {
            date: w[w.len() - 1].date,
            value: w.iter().map(|p| p.value).sum::<f64>() / window as f64,
        })
        .collect()
}

/// Pearson correlation of two series aligned on their shared dates.
/// Returns None when fewer than two dates overlap or either side is
/// constant over the overlap.
pub fn correlation(a: &[TimeSeriesPoint], b: &[TimeSeriesPoint]) -> Option<f64> {
    let b_by_date: BTreeMap<_, _> = b.iter().map(|p| (p.date, p.value)).collect();
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|p| b_by_date.get(&p.date).map(|&v| (p.value, v)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(start: &str, values: &[f64]) -> Vec<TimeSeriesPoint> {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| TimeSeriesPoint {
                date: start + chrono::Days::new(i as u64),
                value,
            })
            .collect()
    }

    #[test]
    fn pct_change_is_relative_to_first_point() {
        let out = pct_change_from_start(&series("2023-01-01", &[200.0, 210.0, 190.0]));
        assert_eq!(out[0].value, 0.0);
        assert!((out[1].value - 0.05).abs() < 1e-12);
        assert!((out[2].value - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn pct_change_empty_and_zero_start() {
        assert!(pct_change_from_start(&[]).is_empty());
        assert!(pct_change_from_start(&series("2023-01-01", &[0.0, 1.0])).is_empty());
    }

    #[test]
    fn rolling_mean_drops_partial_windows() {
        let out = rolling_mean(&series("2023-01-01", &[1.0, 2.0, 3.0, 4.0]), 3);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].value, 2.0);
        assert_eq!(out[1].value, 3.0);
        // Each mean is stamped with the last date of its window.
        assert_eq!(
            out[0].date,
            NaiveDate::parse_from_str("2023-01-03", "%Y-%m-%d").unwrap()
        );
    }

    #[test]
    fn rolling_mean_degenerate_windows() {
        let s = series("2023-01-01", &[1.0, 2.0]);
        assert!(rolling_mean(&s, 0).is_empty());
        assert!(rolling_mean(&s, 3).is_empty());
    }

    #[test]
    fn correlation_of_identical_series_is_one() {
        let s = series("2023-01-01", &[1.0, 3.0, 2.0, 5.0]);
        let r = correlation(&s, &s).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_inverted_series_is_minus_one() {
        let a = series("2023-01-01", &[1.0, 2.0, 3.0]);
        let b = series("2023-01-01", &[3.0, 2.0, 1.0]);
        let r = correlation(&a, &b).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_aligns_on_shared_dates_only() {
        // b is shifted one day; only two dates overlap.
        let a = series("2023-01-01", &[1.0, 2.0, 3.0]);
        let b = series("2023-01-02", &[2.0, 3.0, 4.0]);
        let r = correlation(&a, &b).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_needs_overlap_and_variance() {
        let a = series("2023-01-01", &[1.0, 2.0]);
        let far = series("2024-01-01", &[1.0, 2.0]);
        assert!(correlation(&a, &far).is_none());

        let flat = series("2023-01-01", &[5.0, 5.0]);
        assert!(correlation(&a, &flat).is_none());
    }
}
