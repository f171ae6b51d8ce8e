//! Anchored VWAP crossover strategy.
//!
//! Goes fully long when the latest close trades above the VWAP anchored at
//! a configured reversal date, flat otherwise. An anchor with no bars at or
//! after it is a recoverable condition: the strategy emits a diagnostic and
//! returns an empty allocation.

use crate::domain::{AllocationTarget, Bar, Interval};
use crate::host::{DataBundle, DataRequirement, DiagnosticSink, Strategy, StrategyError};
use crate::indicators::{AnchoredVwap, PriceSource};
use chrono::NaiveDate;
use std::sync::Arc;

/// Anchored VWAP crossover for a single ticker.
///
/// Anchor dates are candidate reversal points supplied at construction.
/// Selection among them is deliberately simple: the most recent anchor not
/// after the latest bar's date (falling back to the earliest anchor when
/// all lie in the future). Detecting reversal points dynamically is the
/// host's problem, not this strategy's.
pub struct AnchoredVwapStrategy {
    assets: Vec<String>,
    interval: Interval,
    anchors: Vec<NaiveDate>,
    source: PriceSource,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl AnchoredVwapStrategy {
    pub fn new(
        ticker: impl Into<String>,
        interval: Interval,
        anchors: Vec<NaiveDate>,
        source: PriceSource,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        assert!(!anchors.is_empty(), "at least one anchor date is required");
        let mut anchors = anchors;
        anchors.sort();
        Self {
            assets: vec![ticker.into()],
            interval,
            anchors,
            source,
            diagnostics,
        }
    }

    fn ticker(&self) -> &str {
        &self.assets[0]
    }

    /// Most recent anchor at or before `latest`; earliest anchor if none is.
    fn select_anchor(&self, latest: NaiveDate) -> NaiveDate {
        self.anchors
            .iter()
            .rev()
            .find(|&&a| a <= latest)
            .copied()
            .unwrap_or(self.anchors[0])
    }
}

impl Strategy for AnchoredVwapStrategy {
    fn assets(&self) -> &[String] {
        &self.assets
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn data_requirements(&self) -> Vec<DataRequirement> {
        vec![DataRequirement::Ohlcv {
            symbol: self.ticker().to_string(),
        }]
    }

    fn on_tick(&self, data: &DataBundle) -> Result<AllocationTarget, StrategyError> {
        let ticker = self.ticker();
        let bars: &[Bar] = data
            .bars(ticker)
            .filter(|b| !b.is_empty())
            .ok_or(StrategyError::MissingData {
                category: "ohlcv",
                symbol: ticker.to_string(),
            })?;

        let latest = bars.last().expect("nonempty window");
        let anchor = self.select_anchor(latest.date());
        let vwap = AnchoredVwap::new(anchor, self.source);

        let Some(last_vwap) = vwap.latest(bars) else {
            self.diagnostics
                .emit(&format!("No data available after anchor date {anchor}"));
            return Ok(AllocationTarget::empty());
        };

        // Equality counts as "not above": stay flat.
        let weight = if latest.close > last_vwap { 1.0 } else { 0.0 };
        Ok(AllocationTarget::single(ticker, weight)?)
    }
}
