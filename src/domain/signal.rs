//! Per-date directional targets for the two assets of a pair.

use chrono::NaiveDate;
use std::cmp::Ordering;

/// Aligned signals for asset A and asset B.
///
/// Sign is direction (long +, short -, flat 0); magnitude is a size multiplier
/// and may exceed 1 where a strategy scales it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    pub dates: Vec<NaiveDate>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl SignalSeries {
    /// All-flat signals over `dates`.
    pub fn flat(dates: Vec<NaiveDate>) -> Self {
        let n = dates.len();
        Self {
            dates,
            a: vec![0.0; n],
            b: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn is_flat(&self) -> bool {
        self.a.iter().chain(&self.b).all(|&s| s == 0.0)
    }
}

/// +1 when `left > right`, -1 when `left < right`, 0 on a tie or when either
/// side is missing.
pub fn direction(left: Option<f64>, right: Option<f64>) -> f64 {
    match (left, right) {
        (Some(l), Some(r)) => match l.partial_cmp(&r) {
            Some(Ordering::Greater) => 1.0,
            Some(Ordering::Less) => -1.0,
            _ => 0.0,
        },
        _ => 0.0,
    }
}
