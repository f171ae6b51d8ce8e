//! Serializable replay configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a replay: the
//! strategy and its parameters, the symbol and interval, and where the
//! input data lives. Configs are TOML on disk and hash to a deterministic
//! run id for naming persisted results.

use anchorlab_core::analytics::ReferenceAnalytics;
use anchorlab_core::domain::Interval;
use anchorlab_core::host::{DiagnosticSink, ExpirySelector, Strategy};
use anchorlab_core::indicators::PriceSource;
use anchorlab_core::strategies::{
    AnchoredVwapStrategy, GammaRegimeStrategy, DEFAULT_REGIME_WEIGHT,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Unique identifier for a replay run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Strategy selection plus parameters (serializable tagged enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategySpec {
    /// Anchored VWAP crossover.
    AnchoredVwap {
        anchors: Vec<NaiveDate>,
        #[serde(default)]
        price_source: PriceSource,
    },

    /// Options gamma regime positioning.
    GammaRegime {
        expiry: ExpirySelector,
        #[serde(default = "default_regime_weight")]
        weight: f64,
    },
}

fn default_regime_weight() -> f64 {
    DEFAULT_REGIME_WEIGHT
}

/// Full configuration for one replay run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub symbol: String,
    pub interval: Interval,
    pub strategy: StrategySpec,

    /// Intraday bar CSV (ts,open,high,low,close,volume).
    pub bars_path: PathBuf,

    /// Options chain JSON snapshot; required for gamma_regime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_path: Option<PathBuf>,

    /// Ticks to skip before the first evaluation.
    #[serde(default)]
    pub warmup_bars: usize,
}

impl RunConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.strategy {
            StrategySpec::AnchoredVwap { anchors, .. } => {
                if anchors.is_empty() {
                    return Err(ConfigError::Invalid(
                        "anchored_vwap needs at least one anchor date".into(),
                    ));
                }
            }
            StrategySpec::GammaRegime { weight, .. } => {
                if !(0.0..=1.0).contains(weight) {
                    return Err(ConfigError::Invalid(format!(
                        "gamma_regime weight {weight} is outside [0, 1]"
                    )));
                }
                if self.chain_path.is_none() {
                    return Err(ConfigError::Invalid(
                        "gamma_regime needs chain_path".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Deterministic content hash. Identical configs share a RunId, so
    /// persisted results can be cached and compared across runs.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Instantiate the configured strategy.
    pub fn build_strategy(&self, diagnostics: Arc<dyn DiagnosticSink>) -> Box<dyn Strategy> {
        match &self.strategy {
            StrategySpec::AnchoredVwap {
                anchors,
                price_source,
            } => Box::new(AnchoredVwapStrategy::new(
                self.symbol.clone(),
                self.interval,
                anchors.clone(),
                *price_source,
                diagnostics,
            )),
            StrategySpec::GammaRegime { expiry, weight } => Box::new(GammaRegimeStrategy::new(
                self.symbol.clone(),
                self.interval,
                *expiry,
                *weight,
                Arc::new(ReferenceAnalytics),
                diagnostics,
            )),
        }
    }
}
