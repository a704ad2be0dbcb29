use serde::{Deserialize, Serialize};

use crate::config::{ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike};

// Define the BarType enum
#[derive(Debug, PartialEq)]
pub enum BarType {
    Bullish,
    Bearish,
}

/// One time-stamped OHLC record (1-minute granularity in practice).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp_ms: i64,

    pub open: OpenPrice,
    pub high: HighPrice,
    pub low: LowPrice,
    pub close: ClosePrice,
}

impl Bar {
    // A constructor for convenience
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Bar {
            timestamp_ms,
            open: OpenPrice::new(open),
            high: HighPrice::new(high),
            low: LowPrice::new(low),
            close: ClosePrice::new(close),
        }
    }

    /// A flat bar where every field equals the open.
    pub fn flat(timestamp_ms: i64, price: f64) -> Self {
        Self::new(timestamp_ms, price, price, price, price)
    }

    pub fn get_type(&self) -> BarType {
        if self.close.value() >= self.open.value() {
            BarType::Bullish
        } else {
            BarType::Bearish
        }
    }

    // Returns the low and high of the bar body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            BarType::Bullish => (self.open.value(), self.close.value()),
            BarType::Bearish => (self.close.value(), self.open.value()),
        }
    }
}
