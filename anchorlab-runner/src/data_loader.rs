//! Input data loading: intraday bar CSVs and options chain JSON snapshots.
//!
//! Bar CSVs carry `ts,open,high,low,close,volume` with naive market-local
//! timestamps (`2024-01-02T09:30:00`). Rows must be in ascending timestamp
//! order — the replay loop depends on it — and OHLC-sane.

use anchorlab_core::domain::{Bar, OptionsChain};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{path}' contains no bars")]
    Empty { path: PathBuf },

    #[error("bars out of order at row {row}: {ts} follows a later timestamp")]
    OutOfOrder { row: usize, ts: NaiveDateTime },

    #[error("insane OHLC values at row {row} ({ts})")]
    InsaneBar { row: usize, ts: NaiveDateTime },
}

/// One CSV row; the symbol comes from the caller, not the file.
#[derive(Debug, Deserialize)]
struct BarRecord {
    ts: NaiveDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load intraday bars for `symbol` from a CSV file.
pub fn load_bars(path: &Path, symbol: &str) -> Result<Vec<Bar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bars = Vec::new();
    for (i, record) in reader.deserialize::<BarRecord>().enumerate() {
        let record = record?;
        // Header is row 1, first data row is row 2.
        let row = i + 2;
        let bar = Bar {
            symbol: symbol.to_string(),
            ts: record.ts,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        };
        if !bar.is_sane() {
            return Err(LoadError::InsaneBar { row, ts: bar.ts });
        }
        if let Some(prev) = bars.last() {
            let prev: &Bar = prev;
            if bar.ts < prev.ts {
                return Err(LoadError::OutOfOrder { row, ts: bar.ts });
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    log::debug!("loaded {} bars for {symbol} from {}", bars.len(), path.display());
    Ok(bars)
}

/// Load an options chain snapshot from a JSON file.
pub fn load_chain(path: &Path) -> Result<OptionsChain, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const GOOD_CSV: &str = "\
ts,open,high,low,close,volume
2024-01-02T09:30:00,9.0,10.0,8.0,9.0,100
2024-01-02T09:45:00,9.0,12.0,9.0,11.0,200
";

    #[test]
    fn loads_well_formed_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "good.csv", GOOD_CSV);
        let bars = load_bars(&path, "GME").unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].symbol, "GME");
        assert_eq!(bars[1].close, 11.0);
        assert_eq!(bars[1].volume, 200);
    }

    #[test]
    fn rejects_out_of_order_rows() {
        let csv = "\
ts,open,high,low,close,volume
2024-01-02T09:45:00,9.0,12.0,9.0,11.0,200
2024-01-02T09:30:00,9.0,10.0,8.0,9.0,100
";
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "unsorted.csv", csv);
        let err = load_bars(&path, "GME").unwrap_err();
        assert!(matches!(err, LoadError::OutOfOrder { row: 3, .. }));
    }

    #[test]
    fn rejects_insane_bar() {
        let csv = "\
ts,open,high,low,close,volume
2024-01-02T09:30:00,9.0,7.0,8.0,9.0,100
";
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "insane.csv", csv);
        let err = load_bars(&path, "GME").unwrap_err();
        assert!(matches!(err, LoadError::InsaneBar { row: 2, .. }));
    }

    #[test]
    fn rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "empty.csv", "ts,open,high,low,close,volume\n");
        let err = load_bars(&path, "GME").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_bars(Path::new("/nonexistent/bars.csv"), "GME").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn loads_chain_json() {
        let json = r#"{
            "symbol": "GME",
            "spot": 100.0,
            "contracts": [
                {
                    "kind": "call",
                    "strike": 100.0,
                    "expiry": "2024-01-19",
                    "premium": 2.5,
                    "open_interest": 500,
                    "greeks": {"delta": 0.5, "gamma": 0.08, "theta": -0.02, "vega": 0.1}
                }
            ]
        }"#;
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "chain.json", json);
        let chain = load_chain(&path).unwrap();

        assert_eq!(chain.symbol, "GME");
        assert_eq!(chain.contracts.len(), 1);
        assert_eq!(chain.contracts[0].greeks.gamma, 0.08);
    }
}
