//! AnchorLab CLI — replay strategies over recorded or synthetic data.
//!
//! Commands:
//! - `run` — replay a strategy from a TOML config file or a named preset
//! - `synth` — generate a synthetic intraday bar CSV for offline runs

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use anchorlab_core::domain::Interval;
use anchorlab_core::host::ExpirySelector;
use anchorlab_core::indicators::PriceSource;
use anchorlab_runner::synthetic::generate_bars;
use anchorlab_runner::{run_from_config, save_result, RunConfig, StrategySpec};

#[derive(Parser)]
#[command(
    name = "anchorlab",
    about = "AnchorLab CLI — intraday signal strategy replays"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a strategy from a TOML config file or a named preset.
    Run {
        /// Path to a TOML config file.
        #[arg(long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Named preset: anchored-vwap or gamma-regime.
        #[arg(long)]
        preset: Option<String>,

        /// Symbol (required with --preset).
        #[arg(long)]
        symbol: Option<String>,

        /// Bar interval (e.g. 15min). Defaults to 15min.
        #[arg(long, default_value = "15min")]
        interval: String,

        /// Intraday bar CSV (required with --preset).
        #[arg(long)]
        bars: Option<PathBuf>,

        /// Options chain JSON (required with gamma-regime preset).
        #[arg(long)]
        chain: Option<PathBuf>,

        /// Anchor dates (YYYY-MM-DD), for the anchored-vwap preset.
        #[arg(long)]
        anchor: Vec<String>,

        /// Ticks to skip before the first evaluation.
        #[arg(long, default_value_t = 0)]
        warmup: usize,

        /// Output directory for result JSON.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Generate a synthetic intraday bar CSV.
    Synth {
        /// Symbol to stamp on the bars.
        #[arg(long, default_value = "GME")]
        symbol: String,

        /// First session date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-01-02")]
        start: String,

        /// Bar interval (e.g. 15min).
        #[arg(long, default_value = "15min")]
        interval: String,

        /// Number of bars to generate.
        #[arg(long, default_value_t = 260)]
        bars: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            preset,
            symbol,
            interval,
            bars,
            chain,
            anchor,
            warmup,
            output_dir,
        } => {
            let config = match (config, preset) {
                (Some(path), None) => RunConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                (None, Some(preset)) => preset_config(
                    &preset, symbol, &interval, bars, chain, &anchor, warmup,
                )?,
                (None, None) => bail!("pass either --config or --preset"),
                (Some(_), Some(_)) => unreachable!("clap conflicts_with"),
            };
            run(&config, &output_dir)
        }
        Commands::Synth {
            symbol,
            start,
            interval,
            bars,
            seed,
            out,
        } => synth(&symbol, &start, &interval, bars, seed, &out),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn parse_interval(s: &str) -> Result<Interval> {
    s.parse::<Interval>().map_err(anyhow::Error::from)
}

#[allow(clippy::too_many_arguments)]
fn preset_config(
    preset: &str,
    symbol: Option<String>,
    interval: &str,
    bars: Option<PathBuf>,
    chain: Option<PathBuf>,
    anchors: &[String],
    warmup: usize,
) -> Result<RunConfig> {
    let symbol = symbol.context("--symbol is required with --preset")?;
    let bars_path = bars.context("--bars is required with --preset")?;
    let interval = parse_interval(interval)?;

    let strategy = match preset {
        "anchored-vwap" => {
            if anchors.is_empty() {
                bail!("the anchored-vwap preset needs at least one --anchor date");
            }
            StrategySpec::AnchoredVwap {
                anchors: anchors
                    .iter()
                    .map(|s| parse_date(s))
                    .collect::<Result<Vec<_>>>()?,
                price_source: PriceSource::Typical,
            }
        }
        "gamma-regime" => {
            if chain.is_none() {
                bail!("the gamma-regime preset needs --chain");
            }
            StrategySpec::GammaRegime {
                expiry: ExpirySelector::Weekly,
                weight: anchorlab_core::strategies::DEFAULT_REGIME_WEIGHT,
            }
        }
        other => bail!("unknown preset '{other}' (expected anchored-vwap or gamma-regime)"),
    };

    let config = RunConfig {
        symbol,
        interval,
        strategy,
        bars_path,
        chain_path: chain,
        warmup_bars: warmup,
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &RunConfig, output_dir: &PathBuf) -> Result<()> {
    let result = run_from_config(config)?;

    println!(
        "{} [{}]: {} ticks, {:.1}% in market, {} flips",
        result.symbol,
        result.interval,
        result.summary.ticks,
        result.summary.time_in_market * 100.0,
        result.summary.flips
    );
    match result.allocations.last() {
        Some(last) if last.target.is_empty() => {
            println!("final allocation: (empty — no post-anchor data)")
        }
        Some(last) => {
            for (symbol, weight) in last.target.iter() {
                println!("final allocation: {symbol} = {weight}");
            }
        }
        None => {}
    }

    let path = save_result(&result, output_dir)?;
    log::info!("result written to {}", path.display());
    Ok(())
}

fn synth(
    symbol: &str,
    start: &str,
    interval: &str,
    n: usize,
    seed: u64,
    out: &PathBuf,
) -> Result<()> {
    let start = parse_date(start)?;
    let interval = parse_interval(interval)?;
    let bars = generate_bars(symbol, start, interval, n, seed);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("creating {}", out.display()))?;
    writer.write_record(["ts", "open", "high", "low", "close", "volume"])?;
    for bar in &bars {
        writer.write_record([
            bar.ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("wrote {} bars to {}", bars.len(), out.display());
    Ok(())
}
