//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{
    parse_optional_date, validate_backtest_config, validate_data_config, validate_strategy_config,
};
use crate::domain::error::PairTraderError;
use crate::domain::metrics::{PerformanceReport, TRADING_DAYS_PER_YEAR};
use crate::domain::pair::{PricePair, fetch_pair};
use crate::domain::strategy::{Strategy, StrategyKind, StrategyParams};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pairtrader", about = "Two-asset pair trading backtester")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one strategy over the configured pair
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Strategy kind, overriding [strategy] kind
        #[arg(short, long)]
        strategy: Option<String>,
        #[arg(long)]
        asset_a: Option<String>,
        #[arg(long)]
        asset_b: Option<String>,
        /// Write the daily ledger as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Run every strategy over the same pair and compare
    Compare {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List codes available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Where the pair comes from and which dates to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSource {
    pub data_path: PathBuf,
    pub asset_a: String,
    pub asset_b: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct BacktestRun {
    pub strategy: Strategy,
    pub pair: PricePair,
    pub result: BacktestResult,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            strategy,
            asset_a,
            asset_b,
            output,
            dry_run,
        } => {
            let overrides = Overrides {
                strategy: strategy.as_deref(),
                asset_a: asset_a.as_deref(),
                asset_b: asset_b.as_deref(),
            };
            if dry_run {
                run_dry_run(&config, &overrides)
            } else {
                run_backtest(&config, &overrides, output.as_deref())
            }
        }
        Command::Compare { config } => run_compare(&config),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[derive(Debug)]
struct Overrides<'a> {
    strategy: Option<&'a str>,
    asset_a: Option<&'a str>,
    asset_b: Option<&'a str>,
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PairTraderError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Validate `[backtest]` and `[strategy]`.
///
/// `[data]` is checked by [`resolve_pair_source`] so command-line asset
/// overrides can stand in for missing keys.
pub fn validate_config(adapter: &dyn ConfigPort) -> Result<(), PairTraderError> {
    validate_backtest_config(adapter)?;
    validate_strategy_config(adapter)?;
    Ok(())
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> BacktestConfig {
    BacktestConfig {
        initial_capital: adapter.get_double("backtest", "initial_capital", 1_000_000.0),
        trading_days_per_year: adapter.get_double(
            "backtest",
            "trading_days_per_year",
            TRADING_DAYS_PER_YEAR,
        ),
    }
}

pub fn build_strategy_params(adapter: &dyn ConfigPort) -> StrategyParams {
    let d = StrategyParams::default();
    let window = |key: &str, default: usize| -> usize {
        adapter.get_int("strategy", key, default as i64).max(1) as usize
    };

    StrategyParams {
        short_window: window("short_window", d.short_window),
        long_window: window("long_window", d.long_window),
        rsi_period: window("rsi_period", d.rsi_period),
        rsi_overbought: adapter.get_double("strategy", "rsi_overbought", d.rsi_overbought),
        rsi_oversold: adapter.get_double("strategy", "rsi_oversold", d.rsi_oversold),
        macd_fast: window("macd_fast", d.macd_fast),
        macd_slow: window("macd_slow", d.macd_slow),
        macd_signal: window("macd_signal", d.macd_signal),
        bollinger_period: window("bollinger_period", d.bollinger_period),
        bollinger_std_dev: adapter.get_double("strategy", "bollinger_std_dev", d.bollinger_std_dev),
        strength_boost_factor: adapter.get_double(
            "strategy",
            "strength_boost_factor",
            d.strength_boost_factor,
        ),
    }
}

/// `kind_override` takes precedence over `[strategy] kind`; the default is the MA crossover.
pub fn build_strategy(
    adapter: &dyn ConfigPort,
    kind_override: Option<&str>,
) -> Result<Strategy, PairTraderError> {
    let kind = match kind_override
        .map(str::to_string)
        .or_else(|| adapter.get_string("strategy", "kind"))
    {
        Some(name) => name.parse::<StrategyKind>()?,
        None => StrategyKind::Crossover,
    };
    Ok(Strategy::new(kind, build_strategy_params(adapter)))
}

pub fn resolve_pair_source(
    adapter: &dyn ConfigPort,
    asset_a: Option<&str>,
    asset_b: Option<&str>,
) -> Result<PairSource, PairTraderError> {
    let required = |key: &str, over: Option<&str>| -> Result<String, PairTraderError> {
        over.map(str::to_string)
            .or_else(|| adapter.get_string("data", key))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| PairTraderError::ConfigMissing {
                section: "data".to_string(),
                key: key.to_string(),
            })
    };

    Ok(PairSource {
        data_path: PathBuf::from(required("path", None)?),
        asset_a: required("asset_a", asset_a)?,
        asset_b: required("asset_b", asset_b)?,
        start_date: parse_optional_date(adapter, "start_date")?.unwrap_or(NaiveDate::MIN),
        end_date: parse_optional_date(adapter, "end_date")?.unwrap_or(NaiveDate::MAX),
    })
}

/// Load the pair, generate signals and run the backtest.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    strategy: &Strategy,
    bt_config: &BacktestConfig,
    source: &PairSource,
) -> Result<BacktestRun, PairTraderError> {
    let pair = load_pair(data_port, source)?;
    let result = backtest_strategy(strategy, &pair, bt_config)?;
    Ok(BacktestRun {
        strategy: strategy.clone(),
        pair,
        result,
    })
}

/// Run every strategy kind over one loaded pair with shared parameters.
pub fn run_compare_pipeline(
    data_port: &dyn DataPort,
    params: &StrategyParams,
    bt_config: &BacktestConfig,
    source: &PairSource,
) -> Result<Vec<BacktestRun>, PairTraderError> {
    let pair = load_pair(data_port, source)?;

    StrategyKind::ALL
        .iter()
        .map(|&kind| {
            let strategy = Strategy::new(kind, params.clone());
            let result = backtest_strategy(&strategy, &pair, bt_config)?;
            Ok(BacktestRun {
                strategy,
                pair: pair.clone(),
                result,
            })
        })
        .collect()
}

fn load_pair(data_port: &dyn DataPort, source: &PairSource) -> Result<PricePair, PairTraderError> {
    let started = Instant::now();
    let pair = fetch_pair(
        data_port,
        &source.asset_a,
        &source.asset_b,
        source.start_date,
        source.end_date,
    )?;
    info!(
        asset_a = %source.asset_a,
        asset_b = %source.asset_b,
        bars = pair.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded price pair"
    );
    Ok(pair)
}

fn backtest_strategy(
    strategy: &Strategy,
    pair: &PricePair,
    bt_config: &BacktestConfig,
) -> Result<BacktestResult, PairTraderError> {
    let started = Instant::now();
    let indicators: Vec<String> = strategy
        .required_indicators()
        .iter()
        .map(ToString::to_string)
        .collect();
    debug!(strategy = strategy.name(), indicators = ?indicators, "computing signals");

    let warmup = strategy.warmup_bars();
    if pair.len() <= warmup {
        warn!(
            strategy = strategy.name(),
            bars = pair.len(),
            warmup,
            "history shorter than indicator warm-up; signals will be flat"
        );
    }

    let signals = strategy.generate_signals(pair);
    let result = backtest_engine::run(&signals, pair, bt_config)?;
    info!(
        strategy = strategy.name(),
        total_return_pct = result.report.total_return_pct,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "backtest complete"
    );
    Ok(result)
}

fn run_backtest(
    config_path: &Path,
    overrides: &Overrides<'_>,
    output_path: Option<&Path>,
) -> Result<(), PairTraderError> {
    let adapter = load_config(config_path)?;
    validate_config(&adapter)?;

    let strategy = build_strategy(&adapter, overrides.strategy)?;
    let bt_config = build_backtest_config(&adapter);
    let source = resolve_pair_source(&adapter, overrides.asset_a, overrides.asset_b)?;
    eprintln!(
        "Running {} on {} / {}",
        strategy.name(),
        source.asset_a,
        source.asset_b
    );

    let data_port = CsvAdapter::new(source.data_path.clone());
    let run = run_backtest_pipeline(&data_port, &strategy, &bt_config, &source)?;

    print_summary(&run, &bt_config);

    if let Some(output) = output_path {
        CsvReportAdapter::new().write(
            &run.result,
            run.strategy.name(),
            &run.pair,
            &output.to_string_lossy(),
        )?;
        eprintln!("\nLedger written to: {}", output.display());
    }
    Ok(())
}

fn run_compare(config_path: &Path) -> Result<(), PairTraderError> {
    let adapter = load_config(config_path)?;
    validate_config(&adapter)?;

    let params = build_strategy_params(&adapter);
    let bt_config = build_backtest_config(&adapter);
    let source = resolve_pair_source(&adapter, None, None)?;

    let data_port = CsvAdapter::new(source.data_path.clone());
    let runs = run_compare_pipeline(&data_port, &params, &bt_config, &source)?;

    eprintln!(
        "\n=== {} / {} ({} bars) ===",
        source.asset_a,
        source.asset_b,
        runs.first().map(|r| r.pair.len()).unwrap_or(0)
    );
    eprintln!(
        "{:<20} {:>12} {:>14} {:>8} {:>14}",
        "Strategy", "Total %", "Annualized %", "Sharpe", "Max DD %"
    );
    for run in &runs {
        let r = &run.result.report;
        eprintln!(
            "{:<20} {:>12.2} {:>14.2} {:>8} {:>14.2}",
            run.strategy.name(),
            r.total_return_pct,
            r.annualized_return_pct,
            format_sharpe(r.sharpe_ratio),
            r.max_drawdown_pct
        );
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PairTraderError> {
    let adapter = load_config(config_path)?;
    validate_data_config(&adapter)?;
    validate_config(&adapter)?;
    let strategy = build_strategy(&adapter, None)?;
    eprintln!(
        "Config valid: strategy {}, warm-up {} bars",
        strategy.name(),
        strategy.warmup_bars()
    );
    Ok(())
}

fn run_dry_run(config_path: &Path, overrides: &Overrides<'_>) -> Result<(), PairTraderError> {
    let adapter = load_config(config_path)?;
    validate_config(&adapter)?;

    let strategy = build_strategy(&adapter, overrides.strategy)?;
    let bt_config = build_backtest_config(&adapter);
    let source = resolve_pair_source(&adapter, overrides.asset_a, overrides.asset_b)?;

    eprintln!("Config validated successfully");
    eprintln!("\nStrategy: {}", strategy.name());
    eprintln!("Indicators to compute:");
    for ind in strategy.required_indicators() {
        eprintln!("  {}", ind);
    }
    eprintln!("Warm-up: {} bars", strategy.warmup_bars());
    eprintln!("\nPair: {} / {}", source.asset_a, source.asset_b);
    eprintln!("Data:  {}", source.data_path.display());
    eprintln!("Range: {} .. {}", source.start_date, source.end_date);
    eprintln!("Capital: {:.2}", bt_config.initial_capital);
    eprintln!("\nDry run complete: configuration is valid");
    Ok(())
}

fn run_list_symbols(config_path: &Path) -> Result<(), PairTraderError> {
    let adapter = load_config(config_path)?;
    let path = adapter
        .get_string("data", "path")
        .ok_or_else(|| PairTraderError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        })?;

    let symbols = CsvAdapter::new(PathBuf::from(path)).list_symbols()?;
    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    Ok(())
}

fn print_summary(run: &BacktestRun, bt_config: &BacktestConfig) {
    let report: &PerformanceReport = &run.result.report;
    eprintln!("\n=== {} ===", run.strategy.name());
    eprintln!("Bars:              {}", run.pair.len());
    eprintln!("Total Return:      {:.2}%", report.total_return_pct);
    eprintln!("Annualized Return: {:.2}%", report.annualized_return_pct);
    eprintln!("Sharpe Ratio:      {}", format_sharpe(report.sharpe_ratio));
    eprintln!("Max Drawdown:      {:.2}%", report.max_drawdown_pct);
    eprintln!(
        "Final Equity:      {:.2}",
        run.result.final_equity(bt_config.initial_capital)
    );
}

fn format_sharpe(sharpe: Option<f64>) -> String {
    match sharpe {
        Some(s) => format!("{:.2}", s),
        None => "n/a".to_string(),
    }
}
