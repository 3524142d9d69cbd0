//! Configuration validation.
//!
//! Validates every `[data]`, `[backtest]` and `[strategy]` field before a run
//! starts. Absent optional keys fall back to their defaults and are accepted.

use crate::domain::error::PairTraderError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    require_non_empty(config, "data", "path")?;
    require_non_empty(config, "data", "asset_a")?;
    require_non_empty(config, "data", "asset_b")?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    validate_initial_capital(config)?;
    validate_trading_days(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    validate_kind(config)?;
    for key in [
        "short_window",
        "long_window",
        "rsi_period",
        "macd_fast",
        "macd_slow",
        "macd_signal",
        "bollinger_period",
    ] {
        validate_window(config, key)?;
    }
    validate_rsi_thresholds(config)?;
    validate_bollinger_std_dev(config)?;
    validate_boost_factor(config)?;
    Ok(())
}

/// Parse an optional `[backtest]` date key.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, PairTraderError> {
    match config.get_string("backtest", key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| {
                PairTraderError::invalid(
                    "backtest",
                    key,
                    format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}

fn require_non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), PairTraderError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PairTraderError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

/// A present key that does not parse as a finite number is an error, not a
/// silent default. `nan` and `inf` parse as `f64` and are rejected here.
fn numeric(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<f64>, PairTraderError> {
    let Some(s) = config.get_string(section, key) else {
        return Ok(None);
    };
    match s.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(PairTraderError::invalid(
            section,
            key,
            format!("'{}' is not a finite number", s),
        )),
        Err(_) => Err(PairTraderError::invalid(section, key, format!("'{}' is not a number", s))),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    if let Some(value) = numeric(config, "backtest", "initial_capital")? {
        if value <= 0.0 {
            return Err(PairTraderError::invalid(
                "backtest",
                "initial_capital",
                "initial_capital must be positive",
            ));
        }
    }
    Ok(())
}

fn validate_trading_days(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    if let Some(value) = numeric(config, "backtest", "trading_days_per_year")? {
        if value <= 0.0 {
            return Err(PairTraderError::invalid(
                "backtest",
                "trading_days_per_year",
                "trading_days_per_year must be positive",
            ));
        }
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    let start_date = parse_optional_date(config, "start_date")?;
    let end_date = parse_optional_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            return Err(PairTraderError::invalid(
                "backtest",
                "start_date",
                "start_date must not be after end_date",
            ));
        }
    }
    Ok(())
}

fn validate_kind(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    match config.get_string("strategy", "kind") {
        Some(s) => s.parse::<StrategyKind>().map(|_| ()),
        None => Ok(()),
    }
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), PairTraderError> {
    match config.get_string("strategy", key) {
        None => Ok(()),
        Some(s) => match s.trim().parse::<i64>() {
            Ok(value) if value >= 1 => Ok(()),
            _ => Err(PairTraderError::invalid(
                "strategy",
                key,
                format!("{} must be a positive integer", key),
            )),
        },
    }
}

fn validate_rsi_thresholds(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    let oversold = numeric(config, "strategy", "rsi_oversold")?.unwrap_or(30.0);
    let overbought = numeric(config, "strategy", "rsi_overbought")?.unwrap_or(70.0);

    if !(0.0..=100.0).contains(&oversold) {
        return Err(PairTraderError::invalid(
            "strategy",
            "rsi_oversold",
            "rsi_oversold must be between 0 and 100",
        ));
    }
    if !(0.0..=100.0).contains(&overbought) {
        return Err(PairTraderError::invalid(
            "strategy",
            "rsi_overbought",
            "rsi_overbought must be between 0 and 100",
        ));
    }
    if oversold >= overbought {
        return Err(PairTraderError::invalid(
            "strategy",
            "rsi_oversold",
            "rsi_oversold must be below rsi_overbought",
        ));
    }
    Ok(())
}

fn validate_bollinger_std_dev(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    if let Some(value) = numeric(config, "strategy", "bollinger_std_dev")? {
        if value < 0.0 {
            return Err(PairTraderError::invalid(
                "strategy",
                "bollinger_std_dev",
                "bollinger_std_dev must be non-negative",
            ));
        }
        // Band width is keyed in hundredths; finer values would be rounded.
        if ((value * 100.0).round() - value * 100.0).abs() > 1e-6 {
            return Err(PairTraderError::invalid(
                "strategy",
                "bollinger_std_dev",
                "bollinger_std_dev supports at most two decimal places",
            ));
        }
    }
    Ok(())
}

fn validate_boost_factor(config: &dyn ConfigPort) -> Result<(), PairTraderError> {
    if let Some(value) = numeric(config, "strategy", "strength_boost_factor")? {
        if value <= 0.0 {
            return Err(PairTraderError::invalid(
                "strategy",
                "strength_boost_factor",
                "strength_boost_factor must be positive",
            ));
        }
    }
    Ok(())
}
