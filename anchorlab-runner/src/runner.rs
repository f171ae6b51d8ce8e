//! Replay harness — drives a strategy the way the host would.
//!
//! One tick per bar: the strategy sees the expanding window
//! `bars[0..=i]` (plus the chain snapshot, when configured) and returns an
//! allocation. The harness records every allocation and summarizes the
//! run.

use anchorlab_core::domain::{AllocationTarget, Bar, Interval, OptionsChain};
use anchorlab_core::host::{DataBundle, LogDiagnostics, Strategy, StrategyError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ConfigError, RunConfig, RunId};
use crate::data_loader::{load_bars, load_chain, LoadError};

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] LoadError),

    #[error("strategy error at tick {tick}: {source}")]
    Strategy {
        tick: usize,
        source: StrategyError,
    },

    #[error("warmup ({warmup}) leaves no ticks to evaluate ({bars} bars)")]
    NothingToEvaluate { warmup: usize, bars: usize },
}

/// The allocation a strategy returned at one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickAllocation {
    pub ts: NaiveDateTime,
    pub target: AllocationTarget,
}

/// Summary statistics over a replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySummary {
    /// Ticks evaluated (after warmup).
    pub ticks: usize,
    /// Ticks where the strategy had no opinion (empty allocation).
    pub empty_ticks: usize,
    /// Fraction of evaluated ticks with positive weight.
    pub time_in_market: f64,
    /// Number of weight changes between consecutive ticks.
    pub flips: usize,
    /// Weight at the final tick (0.0 when the final allocation was empty).
    pub final_weight: f64,
}

/// Complete serializable result of one replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResult {
    pub schema_version: u32,
    pub run_id: RunId,
    pub symbol: String,
    pub interval: Interval,
    pub summary: ReplaySummary,
    pub allocations: Vec<TickAllocation>,
}

/// Replay a strategy over a bar series.
///
/// `warmup` ticks are skipped entirely; from then on every bar gets an
/// evaluation over the full window up to and including it.
pub fn run_replay(
    strategy: &dyn Strategy,
    symbol: &str,
    bars: &[Bar],
    chain: Option<&OptionsChain>,
    warmup: usize,
) -> Result<Vec<TickAllocation>, ReplayError> {
    if warmup >= bars.len() {
        return Err(ReplayError::NothingToEvaluate {
            warmup,
            bars: bars.len(),
        });
    }

    let mut allocations = Vec::with_capacity(bars.len() - warmup);
    for i in warmup..bars.len() {
        let mut bundle = DataBundle::new();
        bundle.insert_bars(symbol, bars[..=i].to_vec());
        if let Some(chain) = chain {
            bundle.insert_chain(symbol, chain.clone());
        }
        let target = strategy
            .on_tick(&bundle)
            .map_err(|source| ReplayError::Strategy { tick: i, source })?;
        allocations.push(TickAllocation {
            ts: bars[i].ts,
            target,
        });
    }
    Ok(allocations)
}

/// Summarize a replay's allocation history for one symbol.
pub fn summarize(symbol: &str, allocations: &[TickAllocation]) -> ReplaySummary {
    let ticks = allocations.len();
    let empty_ticks = allocations.iter().filter(|a| a.target.is_empty()).count();
    let in_market = allocations
        .iter()
        .filter(|a| a.target.weight(symbol).unwrap_or(0.0) > 0.0)
        .count();

    let mut flips = 0;
    for pair in allocations.windows(2) {
        let prev = pair[0].target.weight(symbol).unwrap_or(0.0);
        let cur = pair[1].target.weight(symbol).unwrap_or(0.0);
        if prev != cur {
            flips += 1;
        }
    }

    ReplaySummary {
        ticks,
        empty_ticks,
        time_in_market: if ticks == 0 {
            0.0
        } else {
            in_market as f64 / ticks as f64
        },
        flips,
        final_weight: allocations
            .last()
            .and_then(|a| a.target.weight(symbol))
            .unwrap_or(0.0),
    }
}

/// Load data, build the configured strategy, and replay it end to end.
pub fn run_from_config(config: &RunConfig) -> Result<ReplayResult, ReplayError> {
    let bars = load_bars(&config.bars_path, &config.symbol)?;
    let chain = match &config.chain_path {
        Some(path) => Some(load_chain(path)?),
        None => None,
    };

    let strategy = config.build_strategy(Arc::new(LogDiagnostics));
    log::info!(
        "replaying {} over {} bars (warmup {})",
        config.symbol,
        bars.len(),
        config.warmup_bars
    );

    let allocations = run_replay(
        strategy.as_ref(),
        &config.symbol,
        &bars,
        chain.as_ref(),
        config.warmup_bars,
    )?;
    let summary = summarize(&config.symbol, &allocations);

    Ok(ReplayResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        interval: config.interval,
        summary,
        allocations,
    })
}

/// Write a result as pretty JSON named by its run id; returns the path.
pub fn save_result(result: &ReplayResult, output_dir: &Path) -> std::io::Result<std::path::PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.json", result.run_id));
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
