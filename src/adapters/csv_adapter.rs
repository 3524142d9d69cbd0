//! CSV file data adapter.
//!
//! Reads `<base>/<CODE>.csv` with header `date,open,high,low,close,volume`.

use crate::domain::error::PairTraderError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const EXTENSION: &str = ".csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}{}", code, EXTENSION))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, PairTraderError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| PairTraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut bars = Vec::new();
        let mut skipped = 0usize;

        for (line, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = result.map_err(|e| PairTraderError::Data {
                reason: format!("{}: CSV parse error: {}", path.display(), e),
            })?;

            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                PairTraderError::Data {
                    reason: format!(
                        "{}: invalid date '{}' on data row {}: {}",
                        path.display(),
                        row.date,
                        line + 1,
                        e
                    ),
                }
            })?;

            if date < start_date || date > end_date {
                skipped += 1;
                continue;
            }

            let fields = [
                ("open", row.open),
                ("high", row.high),
                ("low", row.low),
                ("close", row.close),
                ("volume", row.volume),
            ];
            if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(PairTraderError::Data {
                    reason: format!(
                        "{}: non-finite {} '{}' on {}",
                        path.display(),
                        field,
                        value,
                        date
                    ),
                });
            }

            bars.push(OhlcvBar {
                date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        debug!(
            code,
            rows = bars.len(),
            skipped,
            path = %path.display(),
            "loaded price file"
        );
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, PairTraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PairTraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| PairTraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(EXTENSION) {
                if !code.is_empty() {
                    symbols.push(code.to_string());
                }
            }
        }

        symbols.sort();
        debug!(count = symbols.len(), "listed symbols");
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000.5\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n";

        fs::write(path.join("HS300.csv"), csv_content).unwrap();
        fs::write(path.join("ZZ500.csv"), "date,open,high,low,close,volume\n").unwrap();
        fs::write(path.join("notes.txt"), "not a price file").unwrap();

        (dir, path)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn fetch_ohlcv_returns_correct_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("HS300", d(2024, 1, 15), d(2024, 1, 17))
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, d(2024, 1, 15));
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000.0);
        assert_eq!(bars[1].volume, 60000.5);
    }

    #[test]
    fn fetch_ohlcv_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("HS300", d(2024, 1, 16), d(2024, 1, 16))
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, d(2024, 1, 16));
    }

    #[test]
    fn fetch_ohlcv_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-17,1,1,1,3,0\n\
             2024-01-15,1,1,1,1,0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter.fetch_ohlcv("X", d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(bars[0].date, d(2024, 1, 17));
        assert_eq!(bars[1].date, d(2024, 1, 15));
    }

    #[test]
    fn fetch_ohlcv_errors_for_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_ohlcv("XYZ", d(2024, 1, 1), d(2024, 1, 31));
        assert!(matches!(result, Err(PairTraderError::Data { .. })));
    }

    #[test]
    fn fetch_ohlcv_rejects_bad_date() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "date,open,high,low,close,volume\n15/01/2024,1,1,1,1,0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let err = adapter
            .fetch_ohlcv("X", d(2024, 1, 1), d(2024, 1, 31))
            .unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn fetch_ohlcv_rejects_bad_number() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "date,open,high,low,close,volume\n2024-01-15,1,1,1,abc,0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_ohlcv("X", d(2024, 1, 1), d(2024, 1, 31));
        assert!(matches!(result, Err(PairTraderError::Data { .. })));
    }

    #[test]
    fn fetch_ohlcv_rejects_non_finite_values() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-15,1,1,1,1,0\n\
             2024-01-16,1,1,1,NaN,0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Y.csv"),
            "date,open,high,low,close,volume\n2024-01-15,1,inf,1,1,0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let err = adapter
            .fetch_ohlcv("X", d(2024, 1, 1), d(2024, 1, 31))
            .unwrap_err();
        assert!(matches!(err, PairTraderError::Data { .. }));
        assert!(err.to_string().contains("non-finite close"));

        let err = adapter
            .fetch_ohlcv("Y", d(2024, 1, 1), d(2024, 1, 31))
            .unwrap_err();
        assert!(err.to_string().contains("non-finite high"));
    }

    #[test]
    fn fetch_ohlcv_ignores_non_finite_outside_range() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "date,open,high,low,close,volume\n\
             2023-12-29,1,1,1,NaN,0\n\
             2024-01-15,1,1,1,2,0\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter.fetch_ohlcv("X", d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 2.0);
    }

    #[test]
    fn list_symbols_returns_csv_codes() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let symbols = adapter.list_symbols().unwrap();
        assert_eq!(symbols, vec!["HS300", "ZZ500"]);
    }

    #[test]
    fn list_symbols_errors_for_missing_directory() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/pairtrader/data"));
        assert!(adapter.list_symbols().is_err());
    }
}
