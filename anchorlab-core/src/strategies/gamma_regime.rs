//! Options gamma regime strategy.
//!
//! Sizes a half position when aggregate spot gamma exceeds the chain's
//! gamma-max threshold (a stability/pinning regime), stays flat otherwise.
//! The threshold comparison is the entire strategic logic — this is an
//! illustrative positioning rule, not a production risk model.

use crate::analytics::OptionsAnalytics;
use crate::domain::{AllocationTarget, Interval};
use crate::host::{
    DataBundle, DataRequirement, DiagnosticSink, ExpirySelector, Strategy, StrategyError,
};
use std::sync::Arc;

/// Default weight taken when the gamma regime is on.
pub const DEFAULT_REGIME_WEIGHT: f64 = 0.5;

/// Gamma regime positioning for a single ticker.
pub struct GammaRegimeStrategy {
    assets: Vec<String>,
    interval: Interval,
    expiry: ExpirySelector,
    weight: f64,
    analytics: Arc<dyn OptionsAnalytics>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl GammaRegimeStrategy {
    pub fn new(
        ticker: impl Into<String>,
        interval: Interval,
        expiry: ExpirySelector,
        weight: f64,
        analytics: Arc<dyn OptionsAnalytics>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        assert!(
            (0.0..=1.0).contains(&weight),
            "regime weight must be in [0, 1]"
        );
        Self {
            assets: vec![ticker.into()],
            interval,
            expiry,
            weight,
            analytics,
            diagnostics,
        }
    }

    fn ticker(&self) -> &str {
        &self.assets[0]
    }
}

impl Strategy for GammaRegimeStrategy {
    fn assets(&self) -> &[String] {
        &self.assets
    }

    fn interval(&self) -> Interval {
        self.interval
    }

    fn data_requirements(&self) -> Vec<DataRequirement> {
        vec![DataRequirement::Options {
            symbol: self.ticker().to_string(),
            expiry: self.expiry,
        }]
    }

    fn on_tick(&self, data: &DataBundle) -> Result<AllocationTarget, StrategyError> {
        let ticker = self.ticker();
        let chain = data.chain(ticker).ok_or(StrategyError::MissingData {
            category: "options",
            symbol: ticker.to_string(),
        })?;

        let m = self.analytics.metrics(chain)?;

        self.diagnostics.emit(&format!(
            "Net Premium Calls: {}, Net Premium Puts: {}, Max Pain: {}, Spot Gamma: {}, Gamma Max: {}",
            m.net_premium_calls, m.net_premium_puts, m.max_pain, m.spot_gamma, m.gamma_max
        ));

        // Above the threshold the dealers' pin dampens movement; take the
        // configured weight. At or below, expect volatility and stay out.
        let weight = if m.spot_gamma > m.gamma_max {
            self.weight
        } else {
            0.0
        };
        Ok(AllocationTarget::single(ticker, weight)?)
    }
}
