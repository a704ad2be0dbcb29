//! Price and grid value types shared by the calculator and the host adapters.

use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Sub};

/// A behavioral contract for anything that behaves like a price.
pub trait PriceLike {
    fn value(&self) -> f64;

    const MIN_EPSILON: f64 = 1e-12;

    fn is_positive(&self) -> bool {
        self.value() > Self::MIN_EPSILON
    }

    /// Formats the price on a tick grid, e.g. 0.25 ticks -> 2 decimals.
    fn format_on_grid(&self, tick: TickSize) -> String {
        format!("{:.*}", tick.decimals(), self.value())
    }
}

macro_rules! define_price_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name::new(v)
            }
        }

        impl $name {
            pub const fn new(val: f64) -> Self {
                // Absolute prices should not be negative
                let v = if val < 0.0 { 0.0 } else { val };
                Self(v)
            }
        }

        impl Sub for $name {
            type Output = f64;

            fn sub(self, rhs: Self) -> Self::Output {
                self.value() - rhs.value()
            }
        }

        impl Div for $name {
            type Output = f64;

            fn div(self, rhs: Self) -> Self::Output {
                self.value() / rhs.value()
            }
        }

        impl PriceLike for $name {
            fn value(&self) -> f64 {
                self.0
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;

            fn mul(self, rhs: f64) -> Self::Output {
                $name::new(self.value() * rhs)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2}", self.0)
            }
        }
    };
}

// Generate the bar price hierarchy
define_price_type!(OpenPrice);
define_price_type!(HighPrice);
define_price_type!(LowPrice);
define_price_type!(ClosePrice);

/// A target-grid price derived from a strike. Unlike bar prices it is not
/// clamped: strikes below zero map to negative levels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct LevelPrice(f64);

impl LevelPrice {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }
}

impl PriceLike for LevelPrice {
    fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for LevelPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Minimum price increment of an instrument's price grid.
///
/// Unlike prices, a tick size is not clamped on construction: the strike
/// calculator is the one place that rejects non-positive grids.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickSize(f64);

impl TickSize {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Decimals needed to print a price that sits on this grid.
    pub fn decimals(self) -> usize {
        if !self.is_valid() {
            return 2;
        }
        let mut decimals = 0;
        let mut scaled = self.0;
        while decimals < 8 && (scaled - scaled.round()).abs() > 1e-9 {
            scaled *= 10.0;
            decimals += 1;
        }
        decimals
    }
}

impl Default for TickSize {
    fn default() -> Self {
        Self(0.01)
    }
}

impl std::fmt::Display for TickSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.decimals(), self.0)
    }
}
