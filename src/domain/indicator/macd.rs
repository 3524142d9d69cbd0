//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: max(fast, slow) - 1 + signal - 1 bars. Line, signal and histogram
//! are all missing until the signal line exists.

use crate::domain::indicator::{
    IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue, calculate_ema, ema_of,
    missing_series,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    if fast == 0 || slow == 0 || signal_period == 0 {
        return missing_series(bars, indicator_type);
    }

    let ema_fast = calculate_ema(bars, fast).simple_values();
    let ema_slow = calculate_ema(bars, slow).simple_values();

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_of(&macd_line, signal_period);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| match (macd_line[i], signal_line[i]) {
            (Some(line), Some(signal)) => IndicatorPoint {
                date: bar.date,
                value: Some(IndicatorValue::Macd {
                    line,
                    signal,
                    histogram: line - signal,
                }),
            },
            _ => IndicatorPoint::missing(bar.date),
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    fn rising(n: usize) -> Vec<OhlcvBar> {
        let prices: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_bars(&prices)
    }

    #[test]
    fn macd_warmup_default() {
        let bars = rising(40);
        let series = calculate_macd(&bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);

        let warmup = DEFAULT_SLOW - 1 + DEFAULT_SIGNAL - 1;
        for i in 0..warmup {
            assert!(!series.values[i].is_valid(), "Index {} should be missing", i);
        }
        assert!(series.values[warmup].is_valid(), "Index {} should be valid", warmup);
        assert_eq!(series.indicator_type.warmup(), warmup);
    }

    #[test]
    fn macd_histogram_equals_line_minus_signal() {
        let series = calculate_macd(&rising(40), 12, 26, 9);

        for point in &series.values {
            if let Some(IndicatorValue::Macd {
                line,
                signal,
                histogram,
            }) = point.value
            {
                assert!((histogram - (line - signal)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn macd_line_is_ema_fast_minus_ema_slow() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let series = calculate_macd(&bars, 3, 5, 2);

        let ema_fast = calculate_ema(&bars, 3).simple_values();
        let ema_slow = calculate_ema(&bars, 5).simple_values();

        for (i, point) in series.values.iter().enumerate() {
            if let Some(IndicatorValue::Macd { line, .. }) = point.value {
                let expected = ema_fast[i].unwrap() - ema_slow[i].unwrap();
                assert!((line - expected).abs() < f64::EPSILON, "index {}", i);
            }
        }
    }

    #[test]
    fn macd_rising_prices_line_above_signal() {
        let bars: Vec<OhlcvBar> = make_bars(
            &(0..60)
                .map(|i| 100.0 * 1.01_f64.powi(i))
                .collect::<Vec<_>>(),
        );
        let series = calculate_macd(&bars, 12, 26, 9);
        let last = series.values.last().unwrap();
        match last.value {
            Some(IndicatorValue::Macd { line, signal, .. }) => assert!(line > signal),
            _ => panic!("Expected Macd value"),
        }
    }

    #[test]
    fn macd_custom_parameters() {
        let series = calculate_macd(&rising(20), 5, 10, 3);

        let warmup = 10 - 1 + 3 - 1;
        assert!(!series.values[warmup - 1].is_valid());
        assert!(series.values[warmup].is_valid());
    }

    #[test]
    fn macd_zero_period_all_missing() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        for (f, s, g) in [(0, 26, 9), (12, 0, 9), (12, 26, 0)] {
            let series = calculate_macd(&bars, f, s, g);
            assert_eq!(series.len(), 3);
            assert!(series.values.iter().all(|p| !p.is_valid()));
        }
    }

    #[test]
    fn macd_short_input_all_missing() {
        let series = calculate_macd(&rising(20), 12, 26, 9);
        assert!(series.values.iter().all(|p| !p.is_valid()));
    }
}
