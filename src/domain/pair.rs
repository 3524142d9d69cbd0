//! The aligned pair of price series every run operates on.

use crate::domain::error::PairTraderError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

/// Two price series sharing one date index (asset A, asset B).
#[derive(Debug, Clone, PartialEq)]
pub struct PricePair {
    a: PriceSeries,
    b: PriceSeries,
}

impl PricePair {
    pub fn new(a: PriceSeries, b: PriceSeries) -> Result<Self, PairTraderError> {
        check_alignment(&a, &b)?;
        Ok(Self { a, b })
    }

    pub fn a(&self) -> &PriceSeries {
        &self.a
    }

    pub fn b(&self) -> &PriceSeries {
        &self.b
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.a.dates()
    }
}

/// Both series strictly increasing, equal length, identical date at every index.
pub fn check_alignment(a: &PriceSeries, b: &PriceSeries) -> Result<(), PairTraderError> {
    a.check_monotonic()?;
    b.check_monotonic()?;

    if a.len() != b.len() {
        return Err(PairTraderError::alignment(format!(
            "{} has {} bars but {} has {}",
            a.code,
            a.len(),
            b.code,
            b.len()
        )));
    }

    for (i, (x, y)) in a.bars.iter().zip(&b.bars).enumerate() {
        if x.date != y.date {
            return Err(PairTraderError::alignment(format!(
                "date mismatch at index {}: {} has {}, {} has {}",
                i, a.code, x.date, b.code, y.date
            )));
        }
    }

    Ok(())
}

/// Load both codes through `data_port` and build an aligned pair.
pub fn fetch_pair(
    data_port: &dyn DataPort,
    code_a: &str,
    code_b: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PricePair, PairTraderError> {
    let load = |code: &str| -> Result<PriceSeries, PairTraderError> {
        let bars = data_port.fetch_ohlcv(code, start_date, end_date)?;
        if bars.is_empty() {
            return Err(PairTraderError::NoData {
                code: code.to_string(),
            });
        }
        Ok(PriceSeries::new(code, bars))
    };

    let a = load(code_a)?;
    let b = load(code_b)?;
    PricePair::new(a, b)
}
