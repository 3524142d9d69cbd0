//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are missing.

use crate::domain::indicator::stddev::window_mean_stddev;
use crate::domain::indicator::{
    IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue, missing_series,
};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Bollinger {
        period,
        stddev_mult_x100,
    };
    if period == 0 {
        return missing_series(bars, indicator_type);
    }

    let mult = stddev_mult_x100 as f64 / 100.0;
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i + 1 < period {
                return IndicatorPoint::missing(bar.date);
            }
            let (middle, stddev) = window_mean_stddev(&bars[i + 1 - period..=i]);
            IndicatorPoint {
                date: bar.date,
                value: Some(IndicatorValue::Bollinger {
                    upper: middle + mult * stddev,
                    middle,
                    lower: middle - mult * stddev,
                }),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

/// Convert a band width multiplier to the hundredths used as a map key.
pub fn stddev_mult_to_x100(mult: f64) -> u32 {
    (mult * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    fn bands(point: &IndicatorPoint) -> (f64, f64, f64) {
        match point.value {
            Some(IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            }) => (upper, middle, lower),
            _ => panic!("Expected Bollinger value"),
        }
    }

    #[test]
    fn bollinger_warmup() {
        let series = calculate_bollinger(&make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]), 3, 200);

        assert!(!series.values[0].is_valid());
        assert!(!series.values[1].is_valid());
        assert!(series.values[2].is_valid());
        assert!(series.values[4].is_valid());
    }

    #[test]
    fn bollinger_constant_values() {
        let series = calculate_bollinger(&make_bars(&[100.0; 5]), 3, 200);
        let (upper, middle, lower) = bands(&series.values[2]);
        assert_eq!((upper, middle, lower), (100.0, 100.0, 100.0));
    }

    #[test]
    fn bollinger_basic_calculation() {
        let series = calculate_bollinger(&make_bars(&[10.0, 20.0, 30.0]), 3, 200);
        let (upper, middle, lower) = bands(&series.values[2]);

        let expected_middle: f64 = 20.0;
        let stddev = (200.0_f64 / 3.0).sqrt();
        assert!((middle - expected_middle).abs() < 1e-10);
        assert!((upper - (expected_middle + 2.0 * stddev)).abs() < 1e-10);
        assert!((lower - (expected_middle - 2.0 * stddev)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_symmetry() {
        let series = calculate_bollinger(&make_bars(&[10.0, 12.0, 9.0, 14.0]), 3, 150);
        for point in series.values.iter().filter(|p| p.is_valid()) {
            let (upper, middle, lower) = bands(point);
            assert!(((upper - middle) - (middle - lower)).abs() < 1e-10);
        }
    }

    #[test]
    fn mult_conversion_rounds() {
        assert_eq!(stddev_mult_to_x100(2.0), 200);
        assert_eq!(stddev_mult_to_x100(1.5), 150);
        assert_eq!(stddev_mult_to_x100(0.333), 33);
        assert_eq!(stddev_mult_to_x100(-1.0), 0);
    }

    #[test]
    fn bollinger_indicator_type() {
        let series = calculate_bollinger(&make_bars(&[10.0]), 20, 200);
        assert_eq!(
            series.indicator_type,
            IndicatorType::Bollinger {
                period: 20,
                stddev_mult_x100: 200
            }
        );
    }
}
