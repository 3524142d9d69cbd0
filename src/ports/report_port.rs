//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PairTraderError;
use crate::domain::pair::PricePair;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        strategy_name: &str,
        pair: &PricePair,
        output_path: &str,
    ) -> Result<(), PairTraderError>;
}
