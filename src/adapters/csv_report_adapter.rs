//! CSV ledger report adapter.
//!
//! One row per ledger date. Missing values serialize as empty fields.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PairTraderError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::pair::PricePair;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use tracing::info;

#[derive(Debug, Serialize)]
struct ReportRow {
    date: String,
    position_a: Option<f64>,
    position_b: Option<f64>,
    return_a: Option<f64>,
    return_b: Option<f64>,
    portfolio_return: Option<f64>,
    cumulative_return: f64,
    strategy_return_pct: f64,
    benchmark_a_pct: Option<f64>,
    benchmark_b_pct: Option<f64>,
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the ledger into any writer.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        result: &BacktestResult,
        pair: &PricePair,
    ) -> Result<(), PairTraderError> {
        let bench_a = benchmark_line(pair.a());
        let bench_b = benchmark_line(pair.b());

        let mut wtr = csv::Writer::from_writer(writer);
        for (i, row) in result.ledger.rows.iter().enumerate() {
            wtr.serialize(ReportRow {
                date: row.date.format("%Y-%m-%d").to_string(),
                position_a: row.position_a,
                position_b: row.position_b,
                return_a: row.return_a,
                return_b: row.return_b,
                portfolio_return: row.portfolio_return,
                cumulative_return: row.cumulative_return,
                strategy_return_pct: row.cumulative_return * 100.0 - 100.0,
                benchmark_a_pct: bench_a.get(i).copied().flatten(),
                benchmark_b_pct: bench_b.get(i).copied().flatten(),
            })
            .map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        strategy_name: &str,
        pair: &PricePair,
        output_path: &str,
    ) -> Result<(), PairTraderError> {
        let file = File::create(output_path)?;
        self.write_to(file, result, pair)?;
        info!(
            strategy = strategy_name,
            rows = result.ledger.len(),
            path = output_path,
            "wrote ledger report"
        );
        Ok(())
    }
}

/// Buy-and-hold reference: running sum of daily percentage changes, in percent.
///
/// Dates without a defined change are `None`; the sum continues past them.
pub fn benchmark_line(series: &PriceSeries) -> Vec<Option<f64>> {
    let mut running = 0.0;
    series
        .pct_change()
        .into_iter()
        .map(|change| {
            change.map(|c| {
                running += c;
                running * 100.0
            })
        })
        .collect()
}

fn csv_error(e: csv::Error) -> PairTraderError {
    PairTraderError::Data {
        reason: format!("failed to write report: {}", e),
    }
}
