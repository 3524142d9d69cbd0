//! Moving-average crossover with relative-strength position boost.
//!
//! Per asset: +1 when MA(short) > MA(long), -1 when below, 0 on a tie or
//! during warm-up. The two assets are then coupled through the price ratio
//! A/B: on dates where the ratio sits above its run mean, A's signal is
//! multiplied by the boost factor; below the mean, B's signal is.

use crate::domain::indicator::IndicatorType;
use crate::domain::pair::PricePair;
use crate::domain::signal::{SignalSeries, direction};
use crate::domain::strategy::{StrategyParams, per_asset};

pub fn generate(pair: &PricePair, params: &StrategyParams) -> SignalSeries {
    let short = IndicatorType::Sma(params.short_window).to_string();
    let long = IndicatorType::Sma(params.long_window).to_string();
    let indicators = [
        IndicatorType::Sma(params.short_window),
        IndicatorType::Sma(params.long_window),
    ];

    let mut signals = per_asset(pair, &indicators, |_, set, i| {
        direction(set.value_at(&short, i), set.value_at(&long, i))
    });

    let ratio = strength_ratio(pair);
    apply_strength_boost(&mut signals, &ratio, params.strength_boost_factor);
    signals
}

/// close_A / close_B per date; `None` where close_B is zero.
pub fn strength_ratio(pair: &PricePair) -> Vec<Option<f64>> {
    pair.a()
        .closes()
        .into_iter()
        .zip(pair.b().closes())
        .map(|(a, b)| {
            if b == 0.0 {
                None
            } else {
                Some(a / b).filter(|r| r.is_finite())
            }
        })
        .collect()
}

/// Mean of the defined ratios over the whole run.
pub fn strength_threshold(ratio: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = ratio.iter().flatten().copied().collect();
    if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }
}

fn apply_strength_boost(signals: &mut SignalSeries, ratio: &[Option<f64>], boost: f64) {
    let Some(threshold) = strength_threshold(ratio) else {
        return;
    };

    for (i, r) in ratio.iter().enumerate() {
        match r {
            Some(r) if *r > threshold => signals.a[i] *= boost,
            Some(r) if *r < threshold => signals.b[i] *= boost,
            _ => {}
        }
    }
}
