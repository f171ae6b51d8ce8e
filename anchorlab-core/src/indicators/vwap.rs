//! Anchored Volume-Weighted Average Price.
//!
//! VWAP accumulated from a chosen anchor date onward:
//! `vwap[i] = Σ(price[j] * volume[j]) / Σ(volume[j])` over bars `j` at or
//! after the anchor, for `j <= i`. Bars before the anchor get NaN, as does
//! any position where cumulative volume is still zero.

use crate::domain::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which per-bar price feeds the VWAP accumulation.
///
/// The conventional choice is the typical price (H+L+C)/3; the formula is
/// configurable because different venues anchor on different inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// (high + low + close) / 3
    #[default]
    Typical,
    /// close
    Close,
    /// (high + low) / 2
    Hl2,
    /// (open + high + low + close) / 4
    Ohlc4,
}

impl PriceSource {
    /// Extract the configured price from a bar.
    pub fn price(&self, bar: &Bar) -> f64 {
        match self {
            PriceSource::Typical => (bar.high + bar.low + bar.close) / 3.0,
            PriceSource::Close => bar.close,
            PriceSource::Hl2 => (bar.high + bar.low) / 2.0,
            PriceSource::Ohlc4 => (bar.open + bar.high + bar.low + bar.close) / 4.0,
        }
    }
}

/// Anchored VWAP indicator.
#[derive(Debug, Clone)]
pub struct AnchoredVwap {
    anchor: NaiveDate,
    source: PriceSource,
}

impl AnchoredVwap {
    pub fn new(anchor: NaiveDate, source: PriceSource) -> Self {
        Self { anchor, source }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Compute the VWAP series over `bars` (oldest-first).
    ///
    /// Output is aligned with the input: `result[i]` is the anchored VWAP
    /// as of `bars[i]`. Positions before the anchor, and positions where no
    /// volume has accumulated yet, are NaN.
    pub fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = vec![f64::NAN; bars.len()];
        let mut cum_pv = 0.0;
        let mut cum_vol = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            if bar.date() < self.anchor {
                continue;
            }
            if bar.is_void() {
                // Void bars contribute nothing but do not poison the
                // accumulation; the position keeps the running VWAP.
                if cum_vol > 0.0 {
                    result[i] = cum_pv / cum_vol;
                }
                continue;
            }
            cum_pv += self.source.price(bar) * bar.volume as f64;
            cum_vol += bar.volume as f64;
            if cum_vol > 0.0 {
                result[i] = cum_pv / cum_vol;
            }
        }

        result
    }

    /// The VWAP as of the last bar, or `None` if no post-anchor volume exists.
    pub fn latest(&self, bars: &[Bar]) -> Option<f64> {
        self.compute(bars)
            .last()
            .copied()
            .filter(|v| !v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn bar(day: u32, high: f64, low: f64, close: f64, volume: u64) -> Bar {
        Bar {
            symbol: "GME".into(),
            ts: d(day).and_hms_opt(9, 30, 0).unwrap(),
            open: close,
            high,
            low,
            close,
            volume,
        }
    }

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "actual={actual}, expected={expected}"
        );
    }

    #[test]
    fn worked_example_from_two_bars() {
        // Typical prices: (10+8+9)/3 = 9, (12+9+11)/3 = 32/3.
        // VWAP = (9*100 + 32/3*200) / 300 = 91/9 ≈ 10.111.
        let bars = vec![bar(2, 10.0, 8.0, 9.0, 100), bar(3, 12.0, 9.0, 11.0, 200)];
        let vwap = AnchoredVwap::new(d(2), PriceSource::Typical);
        let result = vwap.compute(&bars);
        assert_approx(result[0], 9.0);
        assert_approx(result[1], 91.0 / 9.0);
        assert_approx(vwap.latest(&bars).unwrap(), 91.0 / 9.0);
    }

    #[test]
    fn bars_before_anchor_are_nan() {
        let bars = vec![
            bar(2, 10.0, 8.0, 9.0, 100),
            bar(3, 12.0, 9.0, 11.0, 200),
            bar(4, 13.0, 11.0, 12.0, 100),
        ];
        let vwap = AnchoredVwap::new(d(3), PriceSource::Typical);
        let result = vwap.compute(&bars);
        assert!(result[0].is_nan());
        // Accumulation starts fresh at the anchor.
        assert_approx(result[1], 32.0 / 3.0);
    }

    #[test]
    fn all_bars_before_anchor_yields_no_latest() {
        let bars = vec![bar(2, 10.0, 8.0, 9.0, 100)];
        let vwap = AnchoredVwap::new(d(10), PriceSource::Typical);
        assert!(vwap.latest(&bars).is_none());
        assert!(vwap.compute(&bars).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let vwap = AnchoredVwap::new(d(2), PriceSource::Typical);
        assert!(vwap.compute(&[]).is_empty());
        assert!(vwap.latest(&[]).is_none());
    }

    #[test]
    fn zero_volume_prefix_stays_nan() {
        let bars = vec![bar(2, 10.0, 8.0, 9.0, 0), bar(3, 12.0, 9.0, 11.0, 200)];
        let vwap = AnchoredVwap::new(d(2), PriceSource::Typical);
        let result = vwap.compute(&bars);
        assert!(result[0].is_nan());
        assert_approx(result[1], 32.0 / 3.0);
    }

    #[test]
    fn singleton_window_equals_price_source() {
        let bars = vec![bar(2, 10.0, 8.0, 9.0, 500)];
        for source in [
            PriceSource::Typical,
            PriceSource::Close,
            PriceSource::Hl2,
            PriceSource::Ohlc4,
        ] {
            let vwap = AnchoredVwap::new(d(2), source);
            assert_approx(vwap.latest(&bars).unwrap(), source.price(&bars[0]));
        }
    }

    #[test]
    fn later_anchor_never_grows_the_window() {
        let bars: Vec<Bar> = (2..12).map(|day| bar(day, 11.0, 9.0, 10.0, 100)).collect();
        let early = AnchoredVwap::new(d(2), PriceSource::Typical).compute(&bars);
        let late = AnchoredVwap::new(d(7), PriceSource::Typical).compute(&bars);
        let early_valid = early.iter().filter(|v| !v.is_nan()).count();
        let late_valid = late.iter().filter(|v| !v.is_nan()).count();
        assert!(late_valid <= early_valid);
    }

    #[test]
    fn reordering_same_timestamp_bars_preserves_final_vwap() {
        let a = bar(2, 10.0, 8.0, 9.0, 100);
        let b = bar(2, 12.0, 9.0, 11.0, 200);
        let vwap = AnchoredVwap::new(d(2), PriceSource::Typical);
        let forward = vwap.latest(&[a.clone(), b.clone()]).unwrap();
        let reversed = vwap.latest(&[b, a]).unwrap();
        assert_approx(forward, reversed);
    }

    #[test]
    fn void_bar_keeps_running_value() {
        let mut bars = vec![
            bar(2, 10.0, 8.0, 9.0, 100),
            bar(3, 12.0, 9.0, 11.0, 200),
            bar(4, 13.0, 11.0, 12.0, 100),
        ];
        bars[2].close = f64::NAN;
        let vwap = AnchoredVwap::new(d(2), PriceSource::Typical);
        let result = vwap.compute(&bars);
        assert_approx(result[2], result[1]);
    }

    #[test]
    fn close_source_ignores_highs_and_lows() {
        let bars = vec![bar(2, 100.0, 1.0, 9.0, 100), bar(3, 200.0, 2.0, 11.0, 100)];
        let vwap = AnchoredVwap::new(d(2), PriceSource::Close);
        assert_approx(vwap.latest(&bars).unwrap(), 10.0);
    }
}
