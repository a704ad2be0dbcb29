mod cache;
mod errors;
mod layout;
mod overlay;
mod pill;
mod ratio;
mod scale;
mod strikes;

pub use cache::StrikeCache;
pub use errors::OverlayError;
pub use layout::{
    DebugLine, DebugSnapshot, FixedWidthMeasure, LabelGeometry, LineGeometry, OverlayItem,
    TextMeasure, TextSize, Viewport, debug_block, layout_overlay,
};
pub use overlay::{FrameState, OverlayFrame, SeriesRole, StrikeOverlay};
pub use pill::{CornerArc, PillPath};
pub use ratio::{OpenRatio, latest_open, open_ratio};
pub use scale::LinearPriceScale;
pub use strikes::{StrikeCalculator, StrikeLevel, base_strike, round_to_tick, strike_label};
