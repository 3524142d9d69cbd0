//! OHLCV bars and single-asset price series.

use crate::domain::error::PairTraderError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Chronologically ordered daily bars for one asset.
///
/// Ordering is checked by [`PriceSeries::check_monotonic`], never repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub code: String,
    pub bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    pub fn new(code: impl Into<String>, bars: Vec<OhlcvBar>) -> Self {
        Self {
            code: code.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Simple percentage change from the prior close.
    ///
    /// Index 0 and any bar whose prior close is zero are `None`.
    pub fn pct_change(&self) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(self.bars.len());
        for (i, bar) in self.bars.iter().enumerate() {
            if i == 0 {
                out.push(None);
                continue;
            }
            let prev = self.bars[i - 1].close;
            let change = if prev != 0.0 {
                Some(bar.close / prev - 1.0)
            } else {
                None
            };
            out.push(change.filter(|c| c.is_finite()));
        }
        out
    }

    /// Fails unless dates are strictly increasing (no duplicates, no reordering).
    pub fn check_monotonic(&self) -> Result<(), PairTraderError> {
        for (i, pair) in self.bars.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(PairTraderError::alignment(format!(
                    "{} dates not strictly increasing at index {}: {} then {}",
                    self.code,
                    i + 1,
                    pair[0].date,
                    pair[1].date
                )));
            }
        }
        Ok(())
    }
}
