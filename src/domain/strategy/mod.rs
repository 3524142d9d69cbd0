//! Strategy selection, parameters and signal generation.
//!
//! The strategy set is closed: [`StrategyKind`] names the variants and each
//! variant module exposes one free `generate` function. Every call recomputes
//! its indicators from the full input, so nothing is carried between runs.

pub mod band_breakout;
pub mod convergence;
pub mod crossover;
pub mod oscillator;

use crate::domain::error::PairTraderError;
use crate::domain::indicator::IndicatorType;
use crate::domain::indicator::bollinger::stddev_mult_to_x100;
use crate::domain::indicator_helpers::{IndicatorSet, compute_indicators};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::pair::PricePair;
use crate::domain::signal::SignalSeries;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Crossover,
    OscillatorThreshold,
    ConvergenceCrossover,
    BandBreakout,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Crossover,
        StrategyKind::OscillatorThreshold,
        StrategyKind::ConvergenceCrossover,
        StrategyKind::BandBreakout,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Crossover => "ma_crossover",
            StrategyKind::OscillatorThreshold => "rsi_threshold",
            StrategyKind::ConvergenceCrossover => "macd_crossover",
            StrategyKind::BandBreakout => "bollinger_breakout",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = PairTraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ma_crossover" | "ma" | "crossover" => Ok(StrategyKind::Crossover),
            "rsi_threshold" | "rsi" | "oscillator" => Ok(StrategyKind::OscillatorThreshold),
            "macd_crossover" | "macd" | "convergence" => Ok(StrategyKind::ConvergenceCrossover),
            "bollinger_breakout" | "bollinger" | "band" => Ok(StrategyKind::BandBreakout),
            other => Err(PairTraderError::invalid(
                "strategy",
                "kind",
                format!(
                    "unknown strategy '{}' (expected one of ma_crossover, rsi_threshold, macd_crossover, bollinger_breakout)",
                    other
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub strength_boost_factor: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 20,
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            strength_boost_factor: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub params: StrategyParams,
}

impl Strategy {
    pub fn new(kind: StrategyKind, params: StrategyParams) -> Self {
        Self { kind, params }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn required_indicators(&self) -> Vec<IndicatorType> {
        let p = &self.params;
        match self.kind {
            StrategyKind::Crossover => vec![
                IndicatorType::Sma(p.short_window),
                IndicatorType::Sma(p.long_window),
            ],
            StrategyKind::OscillatorThreshold => vec![IndicatorType::Rsi(p.rsi_period)],
            StrategyKind::ConvergenceCrossover => vec![IndicatorType::Macd {
                fast: p.macd_fast,
                slow: p.macd_slow,
                signal: p.macd_signal,
            }],
            StrategyKind::BandBreakout => vec![IndicatorType::Bollinger {
                period: p.bollinger_period,
                stddev_mult_x100: stddev_mult_to_x100(p.bollinger_std_dev),
            }],
        }
    }

    /// Longest lookback among the required indicators.
    pub fn warmup_bars(&self) -> usize {
        self.required_indicators()
            .iter()
            .map(IndicatorType::warmup)
            .max()
            .unwrap_or(0)
    }

    pub fn generate_signals(&self, pair: &PricePair) -> SignalSeries {
        match self.kind {
            StrategyKind::Crossover => crossover::generate(pair, &self.params),
            StrategyKind::OscillatorThreshold => oscillator::generate(pair, &self.params),
            StrategyKind::ConvergenceCrossover => convergence::generate(pair, &self.params),
            StrategyKind::BandBreakout => band_breakout::generate(pair, &self.params),
        }
    }
}

/// Apply an independent per-asset rule to both sides of the pair.
///
/// `rule` sees one asset's series, its freshly computed indicators and a bar
/// index, and returns that bar's signal.
pub(crate) fn per_asset<F>(pair: &PricePair, indicators: &[IndicatorType], rule: F) -> SignalSeries
where
    F: Fn(&PriceSeries, &IndicatorSet, usize) -> f64,
{
    let side = |series: &PriceSeries| -> Vec<f64> {
        let set = compute_indicators(&series.bars, indicators);
        (0..series.len()).map(|i| rule(series, &set, i)).collect()
    };

    SignalSeries {
        dates: pair.dates(),
        a: side(pair.a()),
        b: side(pair.b()),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::pair;
    use super::*;

    #[test]
    fn kind_parses_names_and_aliases() {
        assert_eq!("ma_crossover".parse::<StrategyKind>().unwrap(), StrategyKind::Crossover);
        assert_eq!("RSI".parse::<StrategyKind>().unwrap(), StrategyKind::OscillatorThreshold);
        assert_eq!(" macd ".parse::<StrategyKind>().unwrap(), StrategyKind::ConvergenceCrossover);
        assert_eq!("bollinger".parse::<StrategyKind>().unwrap(), StrategyKind::BandBreakout);
    }

    #[test]
    fn kind_rejects_unknown() {
        let err = "momentum".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, PairTraderError::ConfigInvalid { key, .. } if key == "kind"));
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn default_params() {
        let p = StrategyParams::default();
        assert_eq!((p.short_window, p.long_window), (5, 20));
        assert_eq!(p.rsi_period, 14);
        assert_eq!((p.rsi_oversold, p.rsi_overbought), (30.0, 70.0));
        assert_eq!((p.macd_fast, p.macd_slow, p.macd_signal), (12, 26, 9));
        assert_eq!((p.bollinger_period, p.bollinger_std_dev), (20, 2.0));
        assert_eq!(p.strength_boost_factor, 1.2);
    }

    #[test]
    fn warmup_bars_per_kind() {
        let params = StrategyParams::default();
        let warmups: Vec<usize> = StrategyKind::ALL
            .iter()
            .map(|&k| Strategy::new(k, params.clone()).warmup_bars())
            .collect();
        assert_eq!(warmups, vec![19, 14, 33, 19]);
    }

    #[test]
    fn every_kind_returns_aligned_signals() {
        let closes_a: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let closes_b: Vec<f64> = (0..50).map(|i| 80.0 + (i as f64 * 0.3).cos() * 4.0).collect();
        let p = pair(&closes_a, &closes_b);

        for kind in StrategyKind::ALL {
            let signals = Strategy::new(kind, StrategyParams::default()).generate_signals(&p);
            assert_eq!(signals.len(), 50, "{}", kind);
            assert_eq!(signals.a.len(), 50);
            assert_eq!(signals.b.len(), 50);
            assert_eq!(signals.dates, p.dates());
        }
    }

    #[test]
    fn short_history_yields_flat_signals() {
        let p = pair(&[100.0, 101.0, 102.0], &[50.0, 49.0, 48.0]);
        for kind in StrategyKind::ALL {
            let signals = Strategy::new(kind, StrategyParams::default()).generate_signals(&p);
            assert!(signals.is_flat(), "{} should be flat", kind);
        }
    }

    #[test]
    fn empty_pair_yields_empty_signals() {
        let p = pair(&[], &[]);
        for kind in StrategyKind::ALL {
            let signals = Strategy::new(kind, StrategyParams::default()).generate_signals(&p);
            assert!(signals.is_empty());
        }
    }
}
