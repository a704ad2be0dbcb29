//! Deterministic synthetic ETF/futures feeds for the demo app and the CLI.

use anyhow::Result;

use crate::config::{BAR_INTERVAL, DEMO, DemoInstrument, TickSize};
use crate::data::InMemoryProvider;
use crate::domain::{Bar, Instrument, PriceSeries};
use crate::engine::round_to_tick;

fn interval_ms() -> i64 {
    BAR_INTERVAL.as_millis() as i64
}

/// Smooth pseudo-random wander around 1.0, a function of the bar index only.
fn wave(t: f64) -> f64 {
    1.0 + 0.002 * (t / 37.0).sin() + 0.001 * (t / 11.0 + 1.3).sin() + 0.0005 * (t / 3.7).sin()
}

/// Futures basis drifts slowly against the ETF.
fn basis(t: f64) -> f64 {
    1.0 + 0.0003 * (t / 53.0).sin()
}

fn synth_bar(inst: &DemoInstrument, ts: i64, idx: u64, scale: impl Fn(f64) -> f64) -> Bar {
    let tick = TickSize::new(inst.tick_size);
    let t = idx as f64;
    let open = round_to_tick(scale(t), tick);
    let close = round_to_tick(scale(t + 1.0), tick);
    let wick = inst.anchor_price * 0.0004 * (1.0 + (t / 5.0).cos().abs());
    let high = round_to_tick(open.max(close) + wick, tick);
    let low = round_to_tick(open.min(close) - wick, tick);
    Bar::new(ts, open, high, low, close)
}

/// Produces matching ETF and futures bars one minute at a time.
#[derive(Debug, Clone)]
pub struct DemoFeed {
    next_idx: u64,
    next_ts: i64,
}

impl DemoFeed {
    /// The first bar is stamped `start_ms`.
    pub fn new(start_ms: i64) -> Self {
        Self {
            next_idx: 0,
            next_ts: start_ms,
        }
    }

    pub fn next_pair(&mut self) -> (Bar, Bar) {
        let idx = self.next_idx;
        let ts = self.next_ts;
        self.next_idx += 1;
        self.next_ts += interval_ms();

        let etf_anchor = DEMO.etf.anchor_price;
        let fut_anchor = DEMO.futures.anchor_price;
        let etf = synth_bar(&DEMO.etf, ts, idx, |t| etf_anchor * wave(t));
        let fut = synth_bar(&DEMO.futures, ts, idx, |t| fut_anchor * wave(t) * basis(t));
        (etf, fut)
    }
}

pub fn demo_instruments() -> (Instrument, Instrument) {
    (
        Instrument::new(DEMO.etf.name, DEMO.etf.tick_size),
        Instrument::new(DEMO.futures.name, DEMO.futures.tick_size),
    )
}

/// A provider preloaded with `bars` minutes of history ending just before `end_ms`.
/// Returns the feed positioned to continue the series live.
pub fn demo_provider(end_ms: i64, bars: usize) -> Result<(InMemoryProvider, DemoFeed)> {
    let (etf, fut) = demo_instruments();
    let start = end_ms - bars as i64 * interval_ms();
    let mut feed = DemoFeed::new(start);

    let mut etf_series = PriceSeries::new(etf.name.clone(), interval_ms());
    let mut fut_series = PriceSeries::new(fut.name.clone(), interval_ms());
    for _ in 0..bars {
        let (e, f) = feed.next_pair();
        etf_series.push(e)?;
        fut_series.push(f)?;
    }

    let mut provider = InMemoryProvider::new()
        .with_instrument(etf)
        .with_instrument(fut);
    provider.insert_series(etf_series);
    provider.insert_series(fut_series);
    Ok((provider, feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriceLike;
    use crate::data::MarketDataProvider;

    #[test]
    fn feed_is_deterministic_and_on_grid() {
        let mut a = DemoFeed::new(0);
        let mut b = DemoFeed::new(0);
        for _ in 0..50 {
            let (ea, fa) = a.next_pair();
            let (eb, fb) = b.next_pair();
            assert_eq!(ea, eb);
            assert_eq!(fa, fb);
            let q = fa.open.value() / DEMO.futures.tick_size;
            assert!((q - q.round()).abs() < 1e-6);
            assert!(fa.high.value() >= fa.open.value().max(fa.close.value()));
            assert!(fa.low.value() <= fa.open.value().min(fa.close.value()));
        }
    }

    #[test]
    fn provider_holds_both_series() {
        let (provider, mut feed) = demo_provider(390 * 60_000, 390).unwrap();
        let spy = provider.resolve_instrument("SPY").unwrap();
        let es = provider.resolve_instrument("es").unwrap();
        let spy_series = provider.history(&spy, 60_000, 0).unwrap();
        let es_series = provider.history(&es, 60_000, 0).unwrap();
        assert_eq!(spy_series.len(), 390);
        assert_eq!(es_series.len(), 390);
        assert_eq!(spy_series.last().unwrap().timestamp_ms, 389 * 60_000);

        let (next, _) = feed.next_pair();
        assert_eq!(next.timestamp_ms, 390 * 60_000);
    }
}
