//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: A time series of indicator values
//!
//! A point whose `value` is `None` is inside the warm-up window (or the input
//! was degenerate). Missing values are never reported as zero.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::calculate_bollinger;
pub use ema::{calculate_ema, ema_of};
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::calculate_stddev;

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<IndicatorValue>,
}

impl IndicatorPoint {
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }

    pub fn simple(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: Some(IndicatorValue::Simple(value)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    /// The scalar value, if this point holds one.
    pub fn as_simple(&self) -> Option<f64> {
        match self.value {
            Some(IndicatorValue::Simple(v)) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Stddev(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

impl IndicatorType {
    /// Number of leading bars that cannot carry a value.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period)
            | IndicatorType::Ema(period)
            | IndicatorType::Stddev(period) => period.saturating_sub(1),
            IndicatorType::Rsi(period) => *period,
            IndicatorType::Macd { fast, slow, signal } => {
                (*fast).max(*slow).saturating_sub(1) + signal.saturating_sub(1)
            }
            IndicatorType::Bollinger { period, .. } => period.saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(IndicatorPoint::as_simple).collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "MA{}", period),
            IndicatorType::Ema(period) => write!(f, "EMA{}", period),
            IndicatorType::Rsi(period) => write!(f, "RSI{}", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV{}", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BB({},{})", period, mult)
            }
        }
    }
}

/// Series of all-missing points, one per bar.
pub(crate) fn missing_series(bars: &[OhlcvBar], indicator_type: IndicatorType) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type,
        values: bars.iter().map(|b| IndicatorPoint::missing(b.date)).collect(),
    }
}

/// Attach dates to a raw optional series.
pub(crate) fn series_from_values(
    bars: &[OhlcvBar],
    indicator_type: IndicatorType,
    raw: &[Option<f64>],
) -> IndicatorSeries {
    let values = bars
        .iter()
        .zip(raw)
        .map(|(bar, v)| match v {
            Some(v) => IndicatorPoint::simple(bar.date, *v),
            None => IndicatorPoint::missing(bar.date),
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

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "MA20");
    }

    #[test]
    fn indicator_type_display_rsi() {
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI14");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_type_display_bollinger() {
        let boll = IndicatorType::Bollinger {
            period: 20,
            stddev_mult_x100: 250,
        };
        assert_eq!(boll.to_string(), "BB(20,2.5)");
    }

    #[test]
    fn warmup_lengths() {
        assert_eq!(IndicatorType::Sma(20).warmup(), 19);
        assert_eq!(IndicatorType::Rsi(14).warmup(), 14);
        assert_eq!(
            IndicatorType::Macd {
                fast: 12,
                slow: 26,
                signal: 9
            }
            .warmup(),
            33
        );
        assert_eq!(IndicatorType::Sma(0).warmup(), 0);
    }

    #[test]
    fn point_accessors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let p = IndicatorPoint::simple(date, 3.5);
        assert!(p.is_valid());
        assert_eq!(p.as_simple(), Some(3.5));

        let m = IndicatorPoint::missing(date);
        assert!(!m.is_valid());
        assert_eq!(m.as_simple(), None);
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(IndicatorType::Sma(5), "short");
        map.insert(IndicatorType::Sma(20), "long");

        assert_eq!(map.get(&IndicatorType::Sma(5)), Some(&"short"));
        assert_eq!(map.get(&IndicatorType::Sma(20)), Some(&"long"));
        assert_eq!(map.get(&IndicatorType::Ema(5)), None);
    }
}
