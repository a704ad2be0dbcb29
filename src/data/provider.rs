use anyhow::{Result, anyhow};
use std::collections::HashMap;

use crate::domain::{Bar, Instrument, PriceSeries};

/// Abstract interface for the host's market data service.
pub trait MarketDataProvider {
    /// Case-insensitive symbol lookup. An unknown symbol is a hard error:
    /// it means the configuration cannot be used at all.
    fn resolve_instrument(&self, name: &str) -> Result<Instrument>;

    /// Bars for an instrument from `since_ms` onward.
    fn history(&self, instrument: &Instrument, interval_ms: i64, since_ms: i64)
    -> Result<PriceSeries>;

    fn latest_bar(&self, instrument: &Instrument, interval_ms: i64, since_ms: i64) -> Option<Bar> {
        self.history(instrument, interval_ms, since_ms)
            .ok()
            .and_then(|series| series.last().copied())
    }
}

/// Instruments and series held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    instruments: Vec<Instrument>,
    series: HashMap<(String, i64), PriceSeries>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.add_instrument(instrument);
        self
    }

    pub fn add_instrument(&mut self, instrument: Instrument) {
        if let Some(existing) = self.instruments.iter_mut().find(|i| i.matches(&instrument.name)) {
            *existing = instrument;
        } else {
            self.instruments.push(instrument);
        }
    }

    /// Stores the series under its own symbol and interval, replacing any previous one.
    pub fn insert_series(&mut self, series: PriceSeries) {
        let key = (series.symbol.to_ascii_uppercase(), series.interval_ms);
        self.series.insert(key, series);
    }

    pub fn push_bar(&mut self, symbol: &str, interval_ms: i64, bar: Bar) -> Result<()> {
        let key = (symbol.to_ascii_uppercase(), interval_ms);
        self.series
            .entry(key)
            .or_insert_with(|| PriceSeries::new(symbol, interval_ms))
            .push(bar)
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn resolve_instrument(&self, name: &str) -> Result<Instrument> {
        self.instruments
            .iter()
            .find(|i| i.matches(name))
            .cloned()
            .ok_or_else(|| anyhow!("Could not find symbol '{}'.", name))
    }

    fn history(
        &self,
        instrument: &Instrument,
        interval_ms: i64,
        since_ms: i64,
    ) -> Result<PriceSeries> {
        let key = (instrument.name.to_ascii_uppercase(), interval_ms);
        let bars = self
            .series
            .get(&key)
            .map(|s| s.since(since_ms).to_vec())
            .unwrap_or_default();
        Ok(PriceSeries::from_bars(
            instrument.name.clone(),
            interval_ms,
            bars,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriceLike;

    fn provider() -> InMemoryProvider {
        let mut p = InMemoryProvider::new().with_instrument(Instrument::new("SPY", 0.01));
        p.push_bar("SPY", 60_000, Bar::flat(0, 500.0)).unwrap();
        p.push_bar("SPY", 60_000, Bar::flat(60_000, 501.0)).unwrap();
        p
    }

    #[test]
    fn resolves_case_insensitively() {
        let p = provider();
        assert_eq!(p.resolve_instrument("spy").unwrap().name, "SPY");
        let err = p.resolve_instrument("QQQ").unwrap_err();
        assert_eq!(err.to_string(), "Could not find symbol 'QQQ'.");
    }

    #[test]
    fn history_respects_since() {
        let p = provider();
        let spy = p.resolve_instrument("SPY").unwrap();
        assert_eq!(p.history(&spy, 60_000, 0).unwrap().len(), 2);
        assert_eq!(p.history(&spy, 60_000, 30_000).unwrap().len(), 1);
        assert_eq!(
            p.latest_bar(&spy, 60_000, 0).unwrap().open.value(),
            501.0
        );
    }

    #[test]
    fn unknown_series_is_empty_not_an_error() {
        let p = InMemoryProvider::new().with_instrument(Instrument::new("ES", 0.25));
        let es = p.resolve_instrument("ES").unwrap();
        assert!(p.history(&es, 60_000, 0).unwrap().is_empty());
        assert!(p.latest_bar(&es, 60_000, 0).is_none());
    }
}
