use serde::{Deserialize, Serialize};

use crate::config::{LevelPrice, OpenPrice, PriceLike, TickSize};
use crate::domain::PriceSeries;
use crate::engine::OverlayError;
use crate::engine::ratio::{OpenRatio, latest_open, open_ratio};

/// Quotients within this many ticks of a half step are treated as exact ties.
const TIE_TOLERANCE: f64 = 1e-9;

/// One integer reference-instrument price point mapped onto the target grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeLevel {
    pub reference_strike: i64,
    pub target_price: LevelPrice,
    pub label: String,
}

/// Snaps `price` to the nearest multiple of `tick`. Ties round half up
/// (toward +infinity). The result is built from an integer tick count so it
/// stays on the grid.
pub fn round_to_tick(price: f64, tick: TickSize) -> f64 {
    let steps = (price / tick.value() + 0.5 + TIE_TOLERANCE).floor();
    steps * tick.value()
}

/// Integer strike the grid is centred on: the open with its fraction discarded.
/// None when the truncated open does not fit in an `i64`.
#[inline]
pub fn base_strike(reference_open: OpenPrice) -> Option<i64> {
    let truncated = reference_open.value().trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if truncated.is_finite() && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

pub fn strike_label(reference_name: &str, strike: i64) -> String {
    format!("{} {}", reference_name, strike)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeCalculator {
    half_width: i32,
    tick_size: TickSize,
}

impl StrikeCalculator {
    pub fn new(half_width: i32, tick_size: TickSize) -> Result<Self, OverlayError> {
        if half_width <= 0 {
            return Err(OverlayError::InvalidConfiguration(format!(
                "strike half-width must be positive, got {}",
                half_width
            )));
        }
        if !tick_size.is_valid() {
            return Err(OverlayError::InvalidConfiguration(format!(
                "tick size must be positive, got {}",
                tick_size.value()
            )));
        }
        Ok(Self {
            half_width,
            tick_size,
        })
    }

    pub fn half_width(&self) -> i32 {
        self.half_width
    }

    pub fn tick_size(&self) -> TickSize {
        self.tick_size
    }

    /// Levels from the latest bar of each series.
    pub fn compute(
        &self,
        reference_name: &str,
        reference: &PriceSeries,
        target: &PriceSeries,
    ) -> Result<Vec<StrikeLevel>, OverlayError> {
        self.levels_from_opens(reference_name, latest_open(reference), latest_open(target))
    }

    pub fn levels_from_opens(
        &self,
        reference_name: &str,
        reference_open: Option<OpenPrice>,
        target_open: Option<OpenPrice>,
    ) -> Result<Vec<StrikeLevel>, OverlayError> {
        let ratio = match open_ratio(reference_open, target_open) {
            OpenRatio::Defined(r) => r,
            OpenRatio::Undefined => return Err(OverlayError::DataUnavailable),
        };
        // A defined ratio implies a positive reference open
        let base = reference_open
            .and_then(base_strike)
            .ok_or(OverlayError::DataUnavailable)?;

        let half_width = i64::from(self.half_width);
        let (Some(low), Some(high)) = (base.checked_sub(half_width), base.checked_add(half_width))
        else {
            log::debug!("Strike ladder around {} does not fit in i64", base);
            return Err(OverlayError::DataUnavailable);
        };

        let levels = (low..=high)
            .map(|strike| StrikeLevel {
                reference_strike: strike,
                target_price: LevelPrice::new(round_to_tick(strike as f64 * ratio, self.tick_size)),
                label: strike_label(reference_name, strike),
            })
            .collect();
        Ok(levels)
    }
}
