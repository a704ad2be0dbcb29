//! Configuration module for the strike overlay.

mod demo;
mod overlay;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::{BAR_INTERVAL, HISTORY_LOOKBACK, OVERLAY_LAYOUT, OverlayLayoutConfig};
pub use demo::{DEMO, DemoConfig, DemoInstrument};
pub use overlay::{LineStylePreset, OverlaySettings, SETTINGS_LIMITS, SettingsLimits};
pub use types::{
    ClosePrice, HighPrice, LevelPrice, LowPrice, OpenPrice, PriceLike, TickSize,
};
