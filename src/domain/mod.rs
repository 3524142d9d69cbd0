//! Core domain types and logic. Nothing here performs I/O or logs.

pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod metrics;
pub mod ohlcv;
pub mod pair;
pub mod signal;
pub mod strategy;
