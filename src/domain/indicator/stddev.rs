//! Standard Deviation indicator.
//!
//! Population standard deviation over n closing prices.
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n-1) / n)
//! Warmup: first (n-1) bars are missing.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, missing_series};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return missing_series(bars, IndicatorType::Stddev(period));
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i + 1 < period {
                IndicatorPoint::missing(bar.date)
            } else {
                let (_, sd) = window_mean_stddev(&bars[i + 1 - period..=i]);
                IndicatorPoint::simple(bar.date, sd)
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Stddev(period),
        values,
    }
}

/// Mean and population standard deviation of the window's closes.
pub(crate) fn window_mean_stddev(window: &[OhlcvBar]) -> (f64, f64) {
    let n = window.len() as f64;
    let mean = window.iter().map(|b| b.close).sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|b| {
            let diff = b.close - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    #[test]
    fn stddev_warmup() {
        let series = calculate_stddev(&make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]), 3);

        assert!(!series.values[0].is_valid());
        assert!(!series.values[1].is_valid());
        assert!(series.values[2].is_valid());
    }

    #[test]
    fn stddev_constant_values() {
        let series = calculate_stddev(&make_bars(&[100.0; 5]), 3);
        assert_eq!(series.values[2].as_simple(), Some(0.0));
    }

    #[test]
    fn stddev_known_values() {
        let bars = make_bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let series = calculate_stddev(&bars, 8);
        assert!((series.values[7].as_simple().unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn stddev_zero_period() {
        let series = calculate_stddev(&make_bars(&[1.0, 2.0]), 0);
        assert!(series.values.iter().all(|p| !p.is_valid()));
    }
}
