use anyhow::{Context, Result};

use crate::config::{BAR_INTERVAL, HISTORY_LOOKBACK, OverlaySettings};
use crate::data::MarketDataProvider;
use crate::domain::{Bar, Instrument, PriceSeries};
use crate::engine::cache::StrikeCache;
use crate::engine::layout::{
    DebugLine, DebugSnapshot, OverlayItem, TextMeasure, Viewport, debug_block, layout_overlay,
};
use crate::engine::ratio::{latest_open, open_ratio};
use crate::engine::strikes::{StrikeCalculator, StrikeLevel};
use crate::engine::OverlayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRole {
    Reference,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Ready,
    /// Configuration was rejected; the overlay never draws.
    Inert,
    DataUnavailable,
    InvalidViewport,
}

/// Output of one paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub items: Vec<OverlayItem>,
    pub state: FrameState,
}

impl OverlayFrame {
    fn empty(state: FrameState) -> Self {
        Self {
            items: Vec::new(),
            state,
        }
    }
}

/// Strike lines for one futures chart, anchored on a reference ETF.
pub struct StrikeOverlay {
    settings: OverlaySettings,
    reference: Instrument,
    target: Instrument,
    reference_history: PriceSeries,
    target_history: PriceSeries,
    /// None when the configuration was rejected
    calculator: Option<StrikeCalculator>,
    cache: StrikeCache,
    warned_unavailable: bool,
}

fn build_calculator(settings: &OverlaySettings, target: &Instrument) -> Option<StrikeCalculator> {
    let checked = settings
        .validate()
        .and_then(|_| StrikeCalculator::new(settings.strike_half_width, target.tick_size));
    match checked {
        Ok(calc) => Some(calc),
        Err(e) => {
            log::error!("Strike overlay disabled: {}", e);
            None
        }
    }
}

impl StrikeOverlay {
    /// Resolves both instruments and loads a day of 1-minute bars for each.
    ///
    /// An unresolvable symbol is returned as an error. Rejected settings are
    /// logged and leave the overlay inert instead.
    pub fn init<P>(
        provider: &P,
        target_symbol: &str,
        settings: OverlaySettings,
        now_ms: i64,
    ) -> Result<Self>
    where
        P: MarketDataProvider + ?Sized,
    {
        let reference = provider.resolve_instrument(&settings.etf_symbol)?;
        let target = provider.resolve_instrument(target_symbol)?;

        let interval_ms = BAR_INTERVAL.as_millis() as i64;
        let since_ms = now_ms - HISTORY_LOOKBACK.as_millis() as i64;
        let reference_history = provider
            .history(&reference, interval_ms, since_ms)
            .with_context(|| format!("Failed to load history for {}", reference.name))?;
        let target_history = provider
            .history(&target, interval_ms, since_ms)
            .with_context(|| format!("Failed to load history for {}", target.name))?;

        log::info!(
            "Strike overlay: {} ({} bars) onto {} ({} bars), half-width {}",
            reference.name,
            reference_history.len(),
            target.name,
            target_history.len(),
            settings.strike_half_width
        );

        let calculator = build_calculator(&settings, &target);
        Ok(Self {
            settings,
            reference,
            target,
            reference_history,
            target_history,
            calculator,
            cache: StrikeCache::new(),
            warned_unavailable: false,
        })
    }

    /// Swaps in new user inputs. A new ETF symbol re-runs `init`; if that
    /// fails the resolved symbol is kept, the other inputs still apply, and
    /// the lookup error is returned.
    pub fn apply_settings<P>(
        &mut self,
        provider: &P,
        settings: OverlaySettings,
        now_ms: i64,
    ) -> Result<()>
    where
        P: MarketDataProvider + ?Sized,
    {
        if settings == self.settings {
            return Ok(());
        }
        if !self.reference.matches(&settings.etf_symbol) {
            let target_symbol = self.target.name.clone();
            return match Self::init(provider, &target_symbol, settings.clone(), now_ms) {
                Ok(overlay) => {
                    *self = overlay;
                    Ok(())
                }
                Err(e) => {
                    self.replace_settings(OverlaySettings {
                        etf_symbol: self.settings.etf_symbol.clone(),
                        ..settings
                    });
                    Err(e)
                }
            };
        }
        self.replace_settings(settings);
        Ok(())
    }

    fn replace_settings(&mut self, settings: OverlaySettings) {
        self.calculator = build_calculator(&settings, &self.target);
        self.settings = settings;
        self.cache.clear();
    }

    /// Live update: a new bar, or a revision of the forming one.
    pub fn on_bar(&mut self, role: SeriesRole, bar: Bar) -> Result<()> {
        match role {
            SeriesRole::Reference => self.reference_history.push(bar),
            SeriesRole::Target => self.target_history.push(bar),
        }
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    pub fn reference(&self) -> &Instrument {
        &self.reference
    }

    pub fn target(&self) -> &Instrument {
        &self.target
    }

    pub fn target_history(&self) -> &PriceSeries {
        &self.target_history
    }

    pub fn is_inert(&self) -> bool {
        self.calculator.is_none()
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        let reference_open = latest_open(&self.reference_history);
        let target_open = latest_open(&self.target_history);
        DebugSnapshot {
            reference_symbol: self.reference.name.clone(),
            target_open,
            reference_open,
            reference_bars: self.reference_history.len(),
            ratio: open_ratio(reference_open, target_open),
        }
    }

    /// Current strike ladder, without layout.
    pub fn levels(&mut self) -> Result<Vec<StrikeLevel>, OverlayError> {
        let calc = self.calculator.ok_or_else(|| {
            OverlayError::InvalidConfiguration("overlay is inert".to_string())
        })?;
        self.cache
            .levels(
                &calc,
                &self.reference.name,
                latest_open(&self.reference_history),
                latest_open(&self.target_history),
            )
            .map(|levels| levels.to_vec())
    }

    /// One render pass. Never fails: every problem becomes an empty frame with
    /// the matching `FrameState`.
    pub fn paint<F, M>(&mut self, price_to_y: F, viewport: Viewport, measure: &M) -> OverlayFrame
    where
        F: Fn(f64) -> f32,
        M: TextMeasure + ?Sized,
    {
        if viewport.validate().is_err() {
            return OverlayFrame::empty(FrameState::InvalidViewport);
        }

        let Some(calc) = self.calculator else {
            return OverlayFrame::empty(FrameState::Inert);
        };

        let levels = match self.cache.levels(
            &calc,
            &self.reference.name,
            latest_open(&self.reference_history),
            latest_open(&self.target_history),
        ) {
            Ok(levels) => {
                self.warned_unavailable = false;
                levels
            }
            Err(e) => {
                if !self.warned_unavailable {
                    log::warn!("No strike levels for {}: {}", self.target.name, e);
                    self.warned_unavailable = true;
                }
                return OverlayFrame::empty(FrameState::DataUnavailable);
            }
        };

        let offset = self.settings.horizontal_offset as f32;
        match layout_overlay(levels, price_to_y, &viewport, offset, measure) {
            Ok(items) => OverlayFrame {
                items,
                state: FrameState::Ready,
            },
            Err(_) => OverlayFrame::empty(FrameState::InvalidViewport),
        }
    }

    /// Debug text block, drawn whenever enabled, with or without a ratio.
    pub fn debug_lines<M>(&self, viewport: Viewport, measure: &M) -> Vec<DebugLine>
    where
        M: TextMeasure + ?Sized,
    {
        if !self.settings.show_debug || viewport.validate().is_err() {
            return Vec::new();
        }
        debug_block(&self.snapshot(), &viewport, measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryProvider;
    use crate::engine::layout::FixedWidthMeasure;
    use crate::engine::scale::LinearPriceScale;

    const NOW: i64 = 10 * 60_000;

    fn provider(spy: &[f64], es: &[f64]) -> InMemoryProvider {
        let mut p = InMemoryProvider::new()
            .with_instrument(Instrument::new("SPY", 0.01))
            .with_instrument(Instrument::new("ES", 0.25));
        for (i, &o) in spy.iter().enumerate() {
            p.push_bar("SPY", 60_000, Bar::flat(i as i64 * 60_000, o)).unwrap();
        }
        for (i, &o) in es.iter().enumerate() {
            p.push_bar("ES", 60_000, Bar::flat(i as i64 * 60_000, o)).unwrap();
        }
        p
    }

    fn settings(half_width: i32) -> OverlaySettings {
        OverlaySettings {
            strike_half_width: half_width,
            ..Default::default()
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(0.0, 600.0, 0.0, 900.0)
    }

    #[test]
    fn unknown_reference_symbol_is_a_hard_error() {
        let p = provider(&[500.0], &[5750.0]);
        let s = OverlaySettings {
            etf_symbol: "QQQ".to_string(),
            ..Default::default()
        };
        assert!(StrikeOverlay::init(&p, "ES", s, NOW).is_err());
    }

    #[test]
    fn invalid_settings_leave_overlay_inert() {
        let p = provider(&[500.0], &[5750.0]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(0), NOW).unwrap();
        assert!(overlay.is_inert());
        let frame = overlay.paint(|_| 10.0, viewport(), &FixedWidthMeasure::LABEL);
        assert_eq!(frame.state, FrameState::Inert);
        assert!(frame.items.is_empty());
    }

    #[test]
    fn paints_full_ladder_when_everything_is_visible() {
        let p = provider(&[499.0, 500.37], &[5740.0, 5750.10]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(2), NOW).unwrap();
        let scale = LinearPriceScale::new(5700.0, 5800.0, viewport());
        let frame = overlay.paint(|p| scale.price_to_y(p), viewport(), &FixedWidthMeasure::LABEL);
        assert_eq!(frame.state, FrameState::Ready);
        let strikes: Vec<i64> = frame.items.iter().map(|i| i.strike).collect();
        assert_eq!(strikes, vec![498, 499, 500, 501, 502]);
        assert_eq!(frame.items[0].line.x_start, -20.0);
        assert!(overlay.debug_lines(viewport(), &FixedWidthMeasure::LABEL).is_empty());
    }

    #[test]
    fn empty_target_history_paints_nothing() {
        let p = provider(&[500.37], &[]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(2), NOW).unwrap();
        let frame = overlay.paint(|_| 100.0, viewport(), &FixedWidthMeasure::LABEL);
        assert_eq!(frame.state, FrameState::DataUnavailable);
        assert!(frame.items.is_empty());
        assert_eq!(overlay.levels(), Err(OverlayError::DataUnavailable));
    }

    #[test]
    fn live_bar_moves_the_ladder() {
        let p = provider(&[500.37], &[5750.10]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(1), NOW).unwrap();
        assert_eq!(overlay.levels().unwrap()[1].reference_strike, 500);

        overlay
            .on_bar(SeriesRole::Reference, Bar::flat(60_000, 502.10))
            .unwrap();
        overlay
            .on_bar(SeriesRole::Target, Bar::flat(60_000, 5774.0))
            .unwrap();
        assert_eq!(overlay.levels().unwrap()[1].reference_strike, 502);
        assert!(overlay.on_bar(SeriesRole::Target, Bar::flat(0, 1.0)).is_err());
    }

    #[test]
    fn debug_block_is_drawn_even_without_ratio() {
        let p = provider(&[500.37], &[]);
        let s = OverlaySettings {
            show_debug: true,
            ..settings(2)
        };
        let mut overlay = StrikeOverlay::init(&p, "ES", s, NOW).unwrap();
        let frame = overlay.paint(|_| 100.0, viewport(), &FixedWidthMeasure::LABEL);
        assert_eq!(frame.state, FrameState::DataUnavailable);
        let debug = overlay.debug_lines(viewport(), &FixedWidthMeasure::LABEL);
        assert_eq!(debug.len(), 5);
        assert_eq!(debug[3].text, "Bars: 1");
        assert_eq!(debug[4].text, "Ratio: n/a");
    }

    #[test]
    fn invalid_viewport_skips_the_pass() {
        let p = provider(&[500.37], &[5750.10]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(2), NOW).unwrap();
        let frame = overlay.paint(
            |_| 100.0,
            Viewport::new(50.0, 10.0, 0.0, 900.0),
            &FixedWidthMeasure::LABEL,
        );
        assert_eq!(frame.state, FrameState::InvalidViewport);
        assert!(frame.items.is_empty());
    }

    #[test]
    fn apply_settings_rebuilds_calculator() {
        let p = provider(&[500.37], &[5750.10]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(0), NOW).unwrap();
        assert!(overlay.is_inert());
        overlay.apply_settings(&p, settings(3), NOW).unwrap();
        assert!(!overlay.is_inert());
        assert_eq!(overlay.levels().unwrap().len(), 7);

        let bad_symbol = OverlaySettings {
            etf_symbol: "QQQ".to_string(),
            ..settings(3)
        };
        assert!(overlay.apply_settings(&p, bad_symbol, NOW).is_err());
    }

    #[test]
    fn unknown_symbol_keeps_other_inputs() {
        let p = provider(&[500.37], &[5750.10]);
        let mut overlay = StrikeOverlay::init(&p, "ES", settings(2), NOW).unwrap();

        let bad_symbol = OverlaySettings {
            etf_symbol: "QQQ".to_string(),
            horizontal_offset: 40,
            ..settings(5)
        };
        assert!(overlay.apply_settings(&p, bad_symbol, NOW).is_err());
        assert_eq!(overlay.settings().etf_symbol, "SPY");
        assert_eq!(overlay.settings().horizontal_offset, 40);
        assert_eq!(overlay.levels().unwrap().len(), 11);

        // Later edits go through without another lookup
        overlay.apply_settings(&p, settings(1), NOW).unwrap();
        assert_eq!(overlay.levels().unwrap().len(), 3);
    }
}
