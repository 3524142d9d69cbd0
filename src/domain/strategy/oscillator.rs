//! RSI threshold strategy: long when oversold, short when overbought.

use crate::domain::indicator::IndicatorType;
use crate::domain::pair::PricePair;
use crate::domain::signal::SignalSeries;
use crate::domain::strategy::{StrategyParams, per_asset};

pub fn generate(pair: &PricePair, params: &StrategyParams) -> SignalSeries {
    let rsi = IndicatorType::Rsi(params.rsi_period);
    let column = rsi.to_string();

    per_asset(pair, &[rsi], |_, set, i| {
        threshold_signal(
            set.value_at(&column, i),
            params.rsi_oversold,
            params.rsi_overbought,
        )
    })
}

/// Strict comparisons: a value exactly on a threshold is flat.
pub fn threshold_signal(value: Option<f64>, oversold: f64, overbought: f64) -> f64 {
    match value {
        Some(v) if v < oversold => 1.0,
        Some(v) if v > overbought => -1.0,
        _ => 0.0,
    }
}
