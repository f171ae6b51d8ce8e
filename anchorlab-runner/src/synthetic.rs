//! Synthetic intraday bar generation for tests and offline runs.
//!
//! A seeded random walk with intraday session structure: bars step through
//! the trading day at the configured interval and roll to the next day's
//! open after the close. Deterministic for a given seed.

use anchorlab_core::domain::{Bar, Interval};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SESSION_OPEN_HOUR: u32 = 9;
const SESSION_OPEN_MINUTE: u32 = 30;
const SESSION_CLOSE_HOUR: u32 = 16;

fn session_open(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(SESSION_OPEN_HOUR, SESSION_OPEN_MINUTE, 0)
        .expect("valid session open")
}

fn next_ts(ts: NaiveDateTime, interval: Interval) -> NaiveDateTime {
    let stepped = ts + chrono::Duration::minutes(interval.minutes() as i64);
    if stepped.hour() >= SESSION_CLOSE_HOUR {
        session_open(ts.date() + chrono::Duration::days(1))
    } else {
        stepped
    }
}

/// Generate `n` synthetic bars starting at `start`'s session open.
pub fn generate_bars(
    symbol: &str,
    start: NaiveDate,
    interval: Interval,
    n: usize,
    seed: u64,
) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ts = session_open(start);
    let mut close = 100.0 + rng.gen_range(-10.0..10.0);
    let mut bars = Vec::with_capacity(n);

    for _ in 0..n {
        let open = close;
        let drift: f64 = rng.gen_range(-0.5..0.5);
        close = (open + drift).max(1.0);
        let high = open.max(close) + rng.gen_range(0.0..0.3);
        let low = (open.min(close) - rng.gen_range(0.0..0.3)).max(0.5);
        let volume = rng.gen_range(5_000..50_000);

        bars.push(Bar {
            symbol: symbol.to_string(),
            ts,
            open,
            high,
            low,
            close,
            volume,
        });
        ts = next_ts(ts, interval);
    }

    bars
}
