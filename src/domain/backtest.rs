//! Backtest engine: signals to lagged positions, returns and compounding.
//!
//! The position held on date t is the signal from date t-1, so the first
//! date never carries a position. This lag is the only place look-ahead is
//! prevented; strategies are not trusted to do it.

use crate::domain::error::PairTraderError;
use crate::domain::metrics::{PerformanceReport, TRADING_DAYS_PER_YEAR};
use crate::domain::pair::PricePair;
use crate::domain::signal::SignalSeries;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    /// Accepted for reporting; the percentage metrics do not depend on it.
    pub initial_capital: f64,
    pub trading_days_per_year: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 1_000_000.0,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub position_a: Option<f64>,
    pub position_b: Option<f64>,
    pub return_a: Option<f64>,
    pub return_b: Option<f64>,
    pub portfolio_return: Option<f64>,
    pub cumulative_return: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionLedger {
    pub rows: Vec<LedgerRow>,
}

impl PositionLedger {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Defined portfolio returns, in date order.
    pub fn portfolio_returns(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.portfolio_return).collect()
    }

    pub fn cumulative(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cumulative_return).collect()
    }

    pub fn final_cumulative(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_return).unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub ledger: PositionLedger,
    pub report: PerformanceReport,
}

impl BacktestResult {
    /// Equity implied by compounding `initial_capital` through the run.
    pub fn final_equity(&self, initial_capital: f64) -> f64 {
        initial_capital * self.ledger.final_cumulative()
    }
}

pub fn run(
    signals: &SignalSeries,
    pair: &PricePair,
    config: &BacktestConfig,
) -> Result<BacktestResult, PairTraderError> {
    check_signal_alignment(signals, pair)?;

    let ledger = build_ledger(signals, pair);
    let report = PerformanceReport::compute(&ledger, config.trading_days_per_year);
    Ok(BacktestResult { ledger, report })
}

fn check_signal_alignment(signals: &SignalSeries, pair: &PricePair) -> Result<(), PairTraderError> {
    if signals.len() != pair.len() || signals.a.len() != pair.len() || signals.b.len() != pair.len()
    {
        return Err(PairTraderError::alignment(format!(
            "signal series has {} dates ({} / {} values) but price pair has {} bars",
            signals.len(),
            signals.a.len(),
            signals.b.len(),
            pair.len()
        )));
    }

    let dates = pair.dates();
    if let Some(i) = signals.dates.iter().zip(&dates).position(|(s, p)| s != p) {
        return Err(PairTraderError::alignment(format!(
            "signal date {} does not match price date {} at index {}",
            signals.dates[i], dates[i], i
        )));
    }
    Ok(())
}

fn build_ledger(signals: &SignalSeries, pair: &PricePair) -> PositionLedger {
    let pct_a = pair.a().pct_change();
    let pct_b = pair.b().pct_change();

    let mut rows = Vec::with_capacity(signals.len());
    let mut cumulative = 1.0;

    for (i, &date) in signals.dates.iter().enumerate() {
        let (position_a, position_b) = if i == 0 {
            (None, None)
        } else {
            (Some(signals.a[i - 1]), Some(signals.b[i - 1]))
        };

        let return_a = position_a.zip(pct_a[i]).map(|(p, r)| p * r);
        let return_b = position_b.zip(pct_b[i]).map(|(p, r)| p * r);
        let portfolio_return = return_a.zip(return_b).map(|(a, b)| a + b);

        if let Some(r) = portfolio_return {
            cumulative *= 1.0 + r;
        }

        rows.push(LedgerRow {
            date,
            position_a,
            position_b,
            return_a,
            return_b,
            portfolio_return,
            cumulative_return: cumulative,
        });
    }

    PositionLedger { rows }
}
