//! AnchorLab Runner — replay harness for the strategies in `anchorlab-core`.
//!
//! Loads TOML run configs and CSV/JSON market data, replays a strategy
//! tick by tick the way the host platform would, and produces serializable
//! results.

pub mod config;
pub mod data_loader;
pub mod runner;
pub mod synthetic;

pub use config::{ConfigError, RunConfig, RunId, StrategySpec};
pub use data_loader::{load_bars, load_chain, LoadError};
pub use runner::{
    run_from_config, run_replay, save_result, summarize, ReplayError, ReplayResult,
    ReplaySummary, TickAllocation, SCHEMA_VERSION,
};
