//! Performance metrics over a position ledger.
//!
//! Conventions:
//! - total return % = (final cumulative - 1) * 100
//! - annualized % = total % * days_per_year / ledger length (linear, not geometric)
//! - Sharpe = sqrt(days_per_year) * mean / sample stddev of defined daily returns
//! - max drawdown % = min(cumulative / running peak - 1) * 100, zero or negative

use crate::domain::backtest::PositionLedger;
use std::collections::BTreeMap;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Below this the return series is treated as having no variance.
const MIN_STDDEV: f64 = 1e-12;

pub const TOTAL_RETURN_PCT: &str = "total_return_pct";
pub const ANNUALIZED_RETURN_PCT: &str = "annualized_return_pct";
pub const SHARPE_RATIO: &str = "sharpe_ratio";
pub const MAX_DRAWDOWN_PCT: &str = "max_drawdown_pct";

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    /// `None` when the daily returns have zero variance or fewer than two observations.
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown_pct: f64,
}

impl PerformanceReport {
    pub fn compute(ledger: &PositionLedger, trading_days_per_year: f64) -> Self {
        let total_return_pct = (ledger.final_cumulative() - 1.0) * 100.0;

        let observations = ledger.len();
        let annualized_return_pct = if observations > 0 {
            total_return_pct * trading_days_per_year / observations as f64
        } else {
            0.0
        };

        PerformanceReport {
            total_return_pct,
            annualized_return_pct,
            sharpe_ratio: compute_sharpe(&ledger.portfolio_returns(), trading_days_per_year),
            max_drawdown_pct: compute_max_drawdown(&ledger.cumulative()),
        }
    }

    /// The four metrics keyed by their fixed names.
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<f64>> {
        BTreeMap::from([
            (TOTAL_RETURN_PCT, Some(self.total_return_pct)),
            (ANNUALIZED_RETURN_PCT, Some(self.annualized_return_pct)),
            (SHARPE_RATIO, self.sharpe_ratio),
            (MAX_DRAWDOWN_PCT, Some(self.max_drawdown_pct)),
        ])
    }
}

fn compute_sharpe(returns: &[f64], trading_days_per_year: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    if !stddev.is_finite() || stddev < MIN_STDDEV {
        return None;
    }

    let sharpe = trading_days_per_year.sqrt() * mean / stddev;
    sharpe.is_finite().then_some(sharpe)
}

fn compute_max_drawdown(cumulative: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &value in cumulative {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = value / peak - 1.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd * 100.0
}
