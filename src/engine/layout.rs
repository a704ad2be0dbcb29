//! Strike levels to screen geometry.
//!
//! Everything here is plain geometry. Drawing belongs to the host surface,
//! see `ui::painter` for the egui one.

use eframe::egui::{Pos2, Rect, pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::config::{OVERLAY_LAYOUT, OpenPrice, PriceLike};
use crate::engine::OverlayError;
use crate::engine::pill::PillPath;
use crate::engine::ratio::OpenRatio;
use crate::engine::strikes::StrikeLevel;

/// Chart client area in pixels; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Viewport {
    pub const fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min.y, rect.max.y, rect.min.x, rect.max.x)
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn validate(&self) -> Result<(), OverlayError> {
        let finite = [self.top, self.bottom, self.left, self.right]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.top >= self.bottom {
            return Err(OverlayError::InvalidViewport {
                top: self.top,
                bottom: self.bottom,
            });
        }
        Ok(())
    }

    /// Inclusive vertical clip test.
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

impl TextSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Font metrics supplied by the host.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextSize;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> TextSize,
{
    fn measure(&self, text: &str) -> TextSize {
        self(text)
    }
}

/// Monospace approximation for hosts without a font engine (CLI, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl FixedWidthMeasure {
    /// Rough metrics of an 8pt bold sans face.
    pub const LABEL: Self = Self {
        char_width: 6.0,
        line_height: 13.0,
    };
}

impl TextMeasure for FixedWidthMeasure {
    fn measure(&self, text: &str) -> TextSize {
        TextSize::new(text.chars().count() as f32 * self.char_width, self.line_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub y: f32,
    pub x_start: f32,
    pub x_end: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelGeometry {
    /// Top-left of the text
    pub anchor: Pos2,
    pub text_size: TextSize,
    pub pill: PillPath,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem {
    pub strike: i64,
    pub line: LineGeometry,
    pub label: LabelGeometry,
}

fn label_geometry(text: &str, line_y: f32, right_edge: f32, size: TextSize) -> LabelGeometry {
    let margin = OVERLAY_LAYOUT.label_margin_px;
    let pad = OVERLAY_LAYOUT.pill_pad_px;

    let anchor = pos2(right_edge - size.width - margin, line_y - size.height / 2.0);
    let pill_rect = Rect::from_min_size(
        pos2(anchor.x - pad / 2.0, anchor.y - pad / 4.0),
        vec2(size.width + pad, size.height + pad / 2.0),
    );

    LabelGeometry {
        anchor,
        text_size: size,
        pill: PillPath::pill(pill_rect),
        text: text.to_string(),
    }
}

/// Lays out one line + label per visible level, in input order.
///
/// Levels whose mapped y falls outside `[top, bottom]` (or is not finite) are
/// skipped. The viewport is checked before anything else, so an invalid
/// viewport is reported even for an empty ladder.
pub fn layout_overlay<F, M>(
    levels: &[StrikeLevel],
    price_to_y: F,
    viewport: &Viewport,
    offset_px: f32,
    measure: &M,
) -> Result<Vec<OverlayItem>, OverlayError>
where
    F: Fn(f64) -> f32,
    M: TextMeasure + ?Sized,
{
    viewport.validate()?;

    let x_start = viewport.left + offset_px;
    let x_end = viewport.right + offset_px;

    let items = levels
        .iter()
        .filter_map(|level| {
            let y = price_to_y(level.target_price.value());
            if !y.is_finite() || !viewport.contains_y(y) {
                return None;
            }
            let size = measure.measure(&level.label);
            Some(OverlayItem {
                strike: level.reference_strike,
                line: LineGeometry { y, x_start, x_end },
                label: label_geometry(&level.label, y, x_end, size),
            })
        })
        .collect();

    Ok(items)
}

/// Values shown in the optional debug block.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugSnapshot {
    pub reference_symbol: String,
    pub target_open: Option<OpenPrice>,
    pub reference_open: Option<OpenPrice>,
    pub reference_bars: usize,
    pub ratio: OpenRatio,
}

fn fmt_open(open: Option<OpenPrice>) -> String {
    open.map(|o| o.to_string()).unwrap_or_else(|| "n/a".to_string())
}

impl DebugSnapshot {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("ETF: {}", self.reference_symbol),
            format!("Fut Open: {}", fmt_open(self.target_open)),
            format!("ETF Open: {}", fmt_open(self.reference_open)),
            format!("Bars: {}", self.reference_bars),
            format!("Ratio: {}", self.ratio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub pos: Pos2,
    pub text: String,
}

/// Right-aligned text lines stacked down from the viewport's top-right corner.
pub fn debug_block<M>(snapshot: &DebugSnapshot, viewport: &Viewport, measure: &M) -> Vec<DebugLine>
where
    M: TextMeasure + ?Sized,
{
    let margin = OVERLAY_LAYOUT.label_margin_px;
    let mut y = viewport.top + margin;
    snapshot
        .lines()
        .into_iter()
        .map(|text| {
            let size = measure.measure(&text);
            let line = DebugLine {
                pos: pos2(viewport.right - size.width - margin, y),
                text,
            };
            y += size.height + OVERLAY_LAYOUT.debug_line_gap;
            line
        })
        .collect()
}
