//! MACD line / signal line crossover strategy.

use crate::domain::indicator::IndicatorType;
use crate::domain::indicator_helpers::{MACD_LINE, MACD_SIGNAL};
use crate::domain::pair::PricePair;
use crate::domain::signal::{SignalSeries, direction};
use crate::domain::strategy::{StrategyParams, per_asset};

pub fn generate(pair: &PricePair, params: &StrategyParams) -> SignalSeries {
    let macd = IndicatorType::Macd {
        fast: params.macd_fast,
        slow: params.macd_slow,
        signal: params.macd_signal,
    };

    per_asset(pair, &[macd], |_, set, i| {
        direction(set.value_at(MACD_LINE, i), set.value_at(MACD_SIGNAL, i))
    })
}
