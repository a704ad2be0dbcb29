use eframe::egui::{Color32, Context, Frame, Margin, Stroke, Visuals};

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub error: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
}

#[derive(Clone, Copy)]
pub struct ChartStyle {
    pub candle_bullish_color: Color32,
    pub candle_bearish_color: Color32,
    pub candle_width_pct: f64,  // 0.0 to 1.0 (relative to one bar)
    pub candle_wick_width: f32, // Pixels
    /// Line colour the demo starts with (the setting itself defaults to transparent)
    pub demo_line_color: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub chart: ChartStyle,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        error: Color32::from_rgb(255, 80, 80),
        central_panel: Color32::from_rgb(18, 18, 22),
        side_panel: Color32::from_rgb(25, 25, 25),
    },
    chart: ChartStyle {
        candle_bullish_color: Color32::from_rgb(38, 166, 154), // TradingView Green
        candle_bearish_color: Color32::from_rgb(239, 83, 80),  // TradingView Red
        candle_width_pct: 0.8,
        candle_wick_width: 1.0,
        demo_line_color: Color32::from_rgb(120, 120, 140),
    },
};

impl UiConfig {
    /// Frame for Left/Right panels (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(4),
            ..Default::default()
        }
    }
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}
