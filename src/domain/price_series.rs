use {
    crate::{config::OpenPrice, domain::Bar},
    anyhow::{Result, bail},
    serde::{Deserialize, Serialize},
};

/// Chronological bars for one instrument. No duplicate timestamps, so
/// `last()` is always the most recent bar.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PriceSeries {
    pub symbol: String,
    pub interval_ms: i64,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, interval_ms: i64) -> Self {
        Self {
            symbol: symbol.into(),
            interval_ms,
            bars: Vec::new(),
        }
    }

    /// Builds a series from bars in any order. Duplicate timestamps keep the
    /// last occurrence.
    pub fn from_bars(symbol: impl Into<String>, interval_ms: i64, mut bars: Vec<Bar>) -> Self {
        // Stable sort keeps input order within a timestamp so "last wins" below
        bars.sort_by_key(|b| b.timestamp_ms);
        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.timestamp_ms == bar.timestamp_ms => *prev = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            symbol: symbol.into(),
            interval_ms,
            bars: deduped,
        }
    }

    /// Appends a newer bar, or replaces the forming bar when the timestamp matches.
    pub fn push(&mut self, bar: Bar) -> Result<()> {
        match self.bars.last_mut() {
            Some(last) if bar.timestamp_ms == last.timestamp_ms => {
                *last = bar;
            }
            Some(last) if bar.timestamp_ms < last.timestamp_ms => {
                bail!(
                    "Out-of-order bar for {}: {} is older than {}",
                    self.symbol,
                    bar.timestamp_ms,
                    last.timestamp_ms
                );
            }
            _ => self.bars.push(bar),
        }
        Ok(())
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn latest_open(&self) -> Option<OpenPrice> {
        self.bars.last().map(|b| b.open)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Bars with `timestamp_ms >= since_ms`.
    pub fn since(&self, since_ms: i64) -> &[Bar] {
        let start = self.bars.partition_point(|b| b.timestamp_ms < since_ms);
        &self.bars[start..]
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
