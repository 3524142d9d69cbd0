//! Shared indicator precomputation and the named-column indicator set.

use crate::domain::indicator::{
    IndicatorSeries, IndicatorType, IndicatorValue, calculate_bollinger, calculate_ema,
    calculate_macd, calculate_rsi, calculate_sma, calculate_stddev,
};
use crate::domain::ohlcv::OhlcvBar;
use std::collections::BTreeMap;

pub const MACD_LINE: &str = "MACD";
pub const MACD_SIGNAL: &str = "MACD_SIGNAL";
pub const MACD_HIST: &str = "MACD_HIST";
pub const BB_UPPER: &str = "BB_UPPER";
pub const BB_MIDDLE: &str = "BB_MIDDLE";
pub const BB_LOWER: &str = "BB_LOWER";

/// Named indicator columns aligned 1:1 with one price series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorSet {
    len: usize,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl IndicatorSet {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add a series, splitting MACD and Bollinger outputs into their columns.
    pub fn insert(&mut self, series: &IndicatorSeries) {
        match series.indicator_type {
            IndicatorType::Macd { .. } => {
                self.insert_split(series, &[MACD_LINE, MACD_SIGNAL, MACD_HIST], |v| match v {
                    IndicatorValue::Macd {
                        line,
                        signal,
                        histogram,
                    } => Some([line, signal, histogram]),
                    _ => None,
                });
            }
            IndicatorType::Bollinger { .. } => {
                self.insert_split(series, &[BB_UPPER, BB_MIDDLE, BB_LOWER], |v| match v {
                    IndicatorValue::Bollinger {
                        upper,
                        middle,
                        lower,
                    } => Some([upper, middle, lower]),
                    _ => None,
                });
            }
            _ => {
                self.columns
                    .insert(series.indicator_type.to_string(), series.simple_values());
            }
        }
    }

    fn insert_split(
        &mut self,
        series: &IndicatorSeries,
        names: &[&str; 3],
        extract: impl Fn(IndicatorValue) -> Option<[f64; 3]>,
    ) {
        let mut cols: [Vec<Option<f64>>; 3] = Default::default();
        for point in &series.values {
            let parts = point.value.and_then(&extract);
            for (k, col) in cols.iter_mut().enumerate() {
                col.push(parts.map(|p| p[k]));
            }
        }
        for (name, col) in names.iter().zip(cols) {
            self.columns.insert((*name).to_string(), col);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Value of `name` at bar `index`; `None` if the column, the index or the
    /// value itself is missing.
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name)?.get(index).copied().flatten()
    }
}

pub fn compute_indicator(bars: &[OhlcvBar], indicator_type: &IndicatorType) -> IndicatorSeries {
    match *indicator_type {
        IndicatorType::Sma(period) => calculate_sma(bars, period),
        IndicatorType::Ema(period) => calculate_ema(bars, period),
        IndicatorType::Rsi(period) => calculate_rsi(bars, period),
        IndicatorType::Stddev(period) => calculate_stddev(bars, period),
        IndicatorType::Macd { fast, slow, signal } => calculate_macd(bars, fast, slow, signal),
        IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        } => calculate_bollinger(bars, period, stddev_mult_x100),
    }
}

pub fn compute_indicators(bars: &[OhlcvBar], types: &[IndicatorType]) -> IndicatorSet {
    let mut set = IndicatorSet::new(bars.len());
    for indicator_type in types {
        set.insert(&compute_indicator(bars, indicator_type));
    }
    set
}
