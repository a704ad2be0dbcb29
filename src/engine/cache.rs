use crate::config::{OpenPrice, PriceLike};
use crate::engine::OverlayError;
use crate::engine::strikes::{StrikeCalculator, StrikeLevel};

/// Every input of a ladder, compared bit for bit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    reference_name: String,
    reference_open: u64,
    target_open: u64,
    half_width: i32,
    tick_size: u64,
}

impl CacheKey {
    fn new(
        calc: &StrikeCalculator,
        reference_name: &str,
        reference_open: OpenPrice,
        target_open: OpenPrice,
    ) -> Self {
        Self {
            reference_name: reference_name.to_string(),
            reference_open: reference_open.value().to_bits(),
            target_open: target_open.value().to_bits(),
            half_width: calc.half_width(),
            tick_size: calc.tick_size().value().to_bits(),
        }
    }
}

/// Single-entry memo of the last computed strike ladder.
#[derive(Debug, Default)]
pub struct StrikeCache {
    key: Option<CacheKey>,
    levels: Vec<StrikeLevel>,
}

impl StrikeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same contract as `StrikeCalculator::levels_from_opens`.
    pub fn levels(
        &mut self,
        calc: &StrikeCalculator,
        reference_name: &str,
        reference_open: Option<OpenPrice>,
        target_open: Option<OpenPrice>,
    ) -> Result<&[StrikeLevel], OverlayError> {
        let (Some(reference), Some(target)) = (reference_open, target_open) else {
            return Err(OverlayError::DataUnavailable);
        };

        let key = CacheKey::new(calc, reference_name, reference, target);
        if self.key.as_ref() == Some(&key) {
            return Ok(&self.levels);
        }

        match calc.levels_from_opens(reference_name, Some(reference), Some(target)) {
            Ok(levels) => {
                self.key = Some(key);
                self.levels = levels;
                Ok(&self.levels)
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.levels.clear();
    }
}
