//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are missing.

use crate::domain::indicator::{IndicatorSeries, IndicatorType, series_from_values};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    let raw = ema_of(&closes, period);
    series_from_values(bars, IndicatorType::Ema(period), &raw)
}

/// EMA over an optional series, starting at its first defined value.
///
/// The seed is the mean of the first `period` defined values. A missing value
/// after the seed yields a missing output and leaves the running EMA untouched.
pub fn ema_of(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut sum = 0.0;
    let mut seen = 0usize;
    let mut ema: Option<f64> = None;

    for (i, value) in values.iter().enumerate().skip(start) {
        let Some(v) = *value else {
            continue;
        };
        match ema {
            None => {
                sum += v;
                seen += 1;
                if seen == period {
                    let seed = sum / period as f64;
                    ema = Some(seed);
                    out[i] = Some(seed);
                }
            }
            Some(prev) => {
                let next = v * k + prev * (1.0 - k);
                ema = Some(next);
                out[i] = Some(next);
            }
        }
    }

    out
}
