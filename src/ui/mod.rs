mod app;
mod chart;
mod painter;
mod panels;
mod ui_config;

pub use app::ChartApp;
pub use painter::{EguiTextMeasure, dash_segments, paint_debug, paint_overlay};
pub use ui_config::{UI_CONFIG, setup_custom_visuals};
