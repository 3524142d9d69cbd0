//! Bollinger band mean-reversion: buy below the lower band, sell above the upper.

use crate::domain::indicator::IndicatorType;
use crate::domain::indicator::bollinger::stddev_mult_to_x100;
use crate::domain::indicator_helpers::{BB_LOWER, BB_UPPER};
use crate::domain::pair::PricePair;
use crate::domain::signal::SignalSeries;
use crate::domain::strategy::{StrategyParams, per_asset};

pub fn generate(pair: &PricePair, params: &StrategyParams) -> SignalSeries {
    let bands = IndicatorType::Bollinger {
        period: params.bollinger_period,
        stddev_mult_x100: stddev_mult_to_x100(params.bollinger_std_dev),
    };

    per_asset(pair, &[bands], |series, set, i| {
        band_signal(
            series.bars[i].close,
            set.value_at(BB_LOWER, i),
            set.value_at(BB_UPPER, i),
        )
    })
}

fn band_signal(close: f64, lower: Option<f64>, upper: Option<f64>) -> f64 {
    match (lower, upper) {
        (Some(lower), _) if close < lower => 1.0,
        (_, Some(upper)) if close > upper => -1.0,
        _ => 0.0,
    }
}
