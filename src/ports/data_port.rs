//! Price data access port trait.

use crate::domain::error::PairTraderError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `code` dated within `[start_date, end_date]`, in source order.
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, PairTraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, PairTraderError>;
}
