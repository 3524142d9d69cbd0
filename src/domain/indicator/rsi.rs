//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over first n bars
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n bars are missing (need n price changes to compute initial average).
//! A non-finite close change is missing and restarts the warmup from the next
//! finite change.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, missing_series};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.len() <= period {
        return missing_series(bars, IndicatorType::Rsi(period));
    }

    let n = period as f64;
    let mut values = Vec::with_capacity(bars.len());
    values.push(IndicatorPoint::missing(bars[0].date));

    let mut seeded = 0usize;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for w in bars.windows(2) {
        let date = w[1].date;
        let change = w[1].close - w[0].close;
        if !change.is_finite() {
            seeded = 0;
            avg_gain = 0.0;
            avg_loss = 0.0;
            values.push(IndicatorPoint::missing(date));
            continue;
        }

        let (gain, loss) = (change.max(0.0), (-change).max(0.0));
        if seeded < period {
            avg_gain += gain;
            avg_loss += loss;
            seeded += 1;
            if seeded < period {
                values.push(IndicatorPoint::missing(date));
                continue;
            }
            avg_gain /= n;
            avg_loss /= n;
        } else {
            avg_gain = (avg_gain * (n - 1.0) + gain) / n;
            avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        }
        values.push(IndicatorPoint::simple(date, rsi_value(avg_gain, avg_loss)));
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
