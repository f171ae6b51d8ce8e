//! Host plugin contract — the boundary between strategies and the platform.
//!
//! The host owns scheduling, data retrieval, and order execution. A
//! strategy declares its assets, interval, and data requirements at
//! construction time, then answers one `on_tick` call per interval with a
//! fresh [`AllocationTarget`]. Strategies hold no durable state beyond
//! their configuration.

pub mod diagnostics;

use crate::domain::{AllocationTarget, Bar, Interval, OptionsChain, WeightError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use diagnostics::{
    DiagnosticSink, LogDiagnostics, NullDiagnostics, RecordingDiagnostics, StdoutDiagnostics,
};

/// Which options expiries a strategy wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirySelector {
    Weekly,
    Monthly,
    Nearest,
}

/// A data category a strategy asks the host to deliver each tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataRequirement {
    /// Ordered OHLCV bar window for one symbol.
    Ohlcv { symbol: String },
    /// Options chain snapshot for one symbol.
    Options {
        symbol: String,
        expiry: ExpirySelector,
    },
}

/// Per-tick data delivered by the host, keyed by category and symbol.
///
/// The bar window is ordered oldest-first and covers everything the host
/// has for the lookback it grants; strategies must not assume a fixed
/// window length.
#[derive(Debug, Clone, Default)]
pub struct DataBundle {
    bars: HashMap<String, Vec<Bar>>,
    chains: HashMap<String, OptionsChain>,
}

impl DataBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_bars(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.bars.insert(symbol.into(), bars);
    }

    pub fn insert_chain(&mut self, symbol: impl Into<String>, chain: OptionsChain) {
        self.chains.insert(symbol.into(), chain);
    }

    /// Bar window for a symbol, oldest-first. `None` if the host delivered
    /// no ohlcv category for it.
    pub fn bars(&self, symbol: &str) -> Option<&[Bar]> {
        self.bars.get(symbol).map(|v| v.as_slice())
    }

    pub fn chain(&self, symbol: &str) -> Option<&OptionsChain> {
        self.chains.get(symbol)
    }

    /// Latest bar for a symbol, if any were delivered.
    pub fn latest_bar(&self, symbol: &str) -> Option<&Bar> {
        self.bars.get(symbol).and_then(|v| v.last())
    }
}

/// Errors a strategy surfaces to the host.
///
/// Only the conditions the strategy cannot recover from locally become
/// errors; an empty post-anchor window is *not* one of these (it maps to
/// an empty allocation instead).
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("missing {category} data for '{symbol}'")]
    MissingData {
        category: &'static str,
        symbol: String,
    },

    #[error("analytics failure: {0}")]
    Analytics(#[from] crate::analytics::AnalyticsError),

    #[error(transparent)]
    Weight(#[from] WeightError),
}

/// The plugin contract a strategy implements.
///
/// `on_tick` must be a pure function of the bundle aside from diagnostic
/// emission: same bundle in, same allocation out. The host may call it at
/// any cadence and never retries a failed tick.
pub trait Strategy: Send + Sync {
    /// Symbols this strategy produces allocations for. Fixed at construction.
    fn assets(&self) -> &[String];

    /// Bar interval this strategy expects.
    fn interval(&self) -> Interval;

    /// Data categories the host must deliver each tick.
    fn data_requirements(&self) -> Vec<DataRequirement>;

    /// Evaluate one tick and return the desired allocation.
    fn on_tick(&self, data: &DataBundle) -> Result<AllocationTarget, StrategyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            symbol: "GME".into(),
            ts: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn bundle_returns_bars_in_insertion_order() {
        let mut bundle = DataBundle::new();
        bundle.insert_bars("GME", vec![bar(2, 10.0), bar(3, 11.0)]);
        let bars = bundle.bars("GME").unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 10.0);
        assert_eq!(bundle.latest_bar("GME").unwrap().close, 11.0);
    }

    #[test]
    fn bundle_misses_are_none() {
        let bundle = DataBundle::new();
        assert!(bundle.bars("GME").is_none());
        assert!(bundle.chain("GME").is_none());
        assert!(bundle.latest_bar("GME").is_none());
    }

    #[test]
    fn data_requirement_serializes_tagged() {
        let req = DataRequirement::Options {
            symbol: "GME".into(),
            expiry: ExpirySelector::Weekly,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"type\":\"options\""));
        assert!(json.contains("\"expiry\":\"weekly\""));
    }

    #[test]
    fn missing_data_error_names_category_and_symbol() {
        let err = StrategyError::MissingData {
            category: "options",
            symbol: "GME".into(),
        };
        assert_eq!(err.to_string(), "missing options data for 'GME'");
    }
}
