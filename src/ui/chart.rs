use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoints, PlotTransform, PlotUi, Polygon};

use crate::config::PriceLike;
use crate::domain::{Bar, PriceSeries};
use crate::ui::ui_config::UI_CONFIG;
use crate::utils::{TimeUtils, epoch_ms_to_clock};

/// Minutes since the first bar; the chart's x unit.
fn bar_x(bar: &Bar, first_ts: i64) -> f64 {
    (bar.timestamp_ms - first_ts) as f64 / TimeUtils::MS_IN_MIN as f64
}

#[inline]
fn draw_wick_line(ui: &mut PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    ui.line(
        Line::new("", PlotPoints::new(vec![[x, bottom], [x, top]]))
            .color(color)
            .width(UI_CONFIG.chart.candle_wick_width),
    );
}

#[inline]
fn draw_body_rect(ui: &mut PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    let half_w = UI_CONFIG.chart.candle_width_pct / 2.0;
    let pts = vec![
        [x - half_w, bottom],
        [x + half_w, bottom],
        [x + half_w, top],
        [x - half_w, top],
    ];

    ui.polygon(
        Polygon::new("", PlotPoints::new(pts))
            .fill_color(color)
            .stroke(Stroke::NONE),
    );
}

fn draw_candles(plot_ui: &mut PlotUi, series: &PriceSeries, first_ts: i64) {
    for bar in series.bars() {
        let x = bar_x(bar, first_ts);
        let is_green = bar.close.value() >= bar.open.value();
        let color = if is_green {
            UI_CONFIG.chart.candle_bullish_color
        } else {
            UI_CONFIG.chart.candle_bearish_color
        };

        draw_wick_line(plot_ui, x, bar.high.value(), bar.low.value(), color);

        let (body_bot, body_top) = bar.body_range();
        // Doji check
        let body_top = if (body_top - body_bot).abs() < f64::EPSILON {
            body_bot * 1.00002
        } else {
            body_top
        };
        draw_body_rect(plot_ui, x, body_top, body_bot, color);
    }
}

/// Candle chart of the target series. Returns the plot transform so the host
/// can map prices to pixels for the overlay.
pub fn show_candle_chart(ui: &mut Ui, series: &PriceSeries) -> PlotTransform {
    let first_ts = series.bars().first().map(|b| b.timestamp_ms).unwrap_or(0);

    let response = Plot::new("strike_chart")
        .x_axis_formatter(move |mark, _range| {
            let ts = first_ts + (mark.value * TimeUtils::MS_IN_MIN as f64) as i64;
            epoch_ms_to_clock(ts)
        })
        .label_formatter(|_, _| String::new())
        .allow_double_click_reset(true)
        .show(ui, |plot_ui| {
            draw_candles(plot_ui, series, first_ts);
        });

    response.transform
}
