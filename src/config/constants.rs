use std::time::Duration;

// Top Level Constants
pub const BAR_INTERVAL: Duration = Duration::from_secs(60); // 1-minute bars feed both series.
pub const HISTORY_LOOKBACK: Duration = Duration::from_secs(24 * 60 * 60);

/// Label and pill geometry, in pixels.
pub struct OverlayLayoutConfig {
    /// Gap between a label's right edge and the (offset) viewport edge
    pub label_margin_px: f32,
    /// Pill width = text width + pad; pill height = text height + pad / 2
    pub pill_pad_px: f32,
    pub label_font_size: f32,
    pub debug_font_size: f32,
    pub debug_line_gap: f32,
    /// Polyline resolution of each rounded pill corner
    pub arc_segments: usize,
}

pub const OVERLAY_LAYOUT: OverlayLayoutConfig = OverlayLayoutConfig {
    label_margin_px: 5.0,
    pill_pad_px: 4.0,
    label_font_size: 8.0,
    debug_font_size: 10.0,
    debug_line_gap: 2.0,
    arc_segments: 8,
};

/// Log render passes slower than their `trace_time!` threshold.
pub const LOG_PERFORMANCE: bool = cfg!(debug_assertions);
