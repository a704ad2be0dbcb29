use eframe::egui::{ComboBox, Grid, RichText, Slider, Ui};
use strum::IntoEnumIterator;

use crate::config::{LineStylePreset, OverlaySettings, SETTINGS_LIMITS};
use crate::engine::{FrameState, OpenRatio};
use crate::ui::ui_config::UI_CONFIG;

/// What the settings panel asks the app to do this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvents {
    pub settings_changed: bool,
}

/// Settings widgets. `symbol_input` is only copied into the settings when the
/// edit is committed (focus lost), so a half-typed symbol never triggers a lookup.
pub fn settings_panel(
    ui: &mut Ui,
    settings: &mut OverlaySettings,
    symbol_input: &mut String,
    live: &mut bool,
) -> PanelEvents {
    let mut events = PanelEvents::default();

    ui.label(RichText::new("Strike Overlay").color(UI_CONFIG.colors.heading).strong());
    ui.add_space(6.0);

    Grid::new("overlay_settings")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("ETF Symbol");
            let resp = ui.text_edit_singleline(symbol_input);
            if resp.lost_focus() && !symbol_input.trim().eq_ignore_ascii_case(&settings.etf_symbol)
            {
                settings.etf_symbol = symbol_input.trim().to_ascii_uppercase();
                events.settings_changed = true;
            }
            ui.end_row();

            ui.label("Strike Half-Width");
            events.settings_changed |= ui
                .add(Slider::new(
                    &mut settings.strike_half_width,
                    SETTINGS_LIMITS.strike_half_width.clone(),
                ))
                .changed();
            ui.end_row();

            ui.label("Line Colour");
            events.settings_changed |= ui.color_edit_button_srgba(&mut settings.line_color).changed();
            ui.end_row();

            ui.label("Line Style");
            ComboBox::from_id_salt("line_style")
                .selected_text(settings.line_style.to_string())
                .show_ui(ui, |ui| {
                    for style in LineStylePreset::iter() {
                        if ui
                            .selectable_value(&mut settings.line_style, style, style.to_string())
                            .changed()
                        {
                            events.settings_changed = true;
                        }
                    }
                });
            ui.end_row();

            ui.label("Line Thickness");
            events.settings_changed |= ui
                .add(Slider::new(
                    &mut settings.line_thickness,
                    SETTINGS_LIMITS.line_thickness.clone(),
                ))
                .changed();
            ui.end_row();

            ui.label("Label Colour");
            events.settings_changed |= ui.color_edit_button_srgba(&mut settings.label_color).changed();
            ui.end_row();

            ui.label("Label BG Colour");
            events.settings_changed |= ui
                .color_edit_button_srgba(&mut settings.label_bg_color)
                .changed();
            ui.end_row();

            ui.label("Horizontal Offset (px)");
            events.settings_changed |= ui
                .add(Slider::new(
                    &mut settings.horizontal_offset,
                    SETTINGS_LIMITS.horizontal_offset.clone(),
                ))
                .changed();
            ui.end_row();

            ui.label("Debug Info");
            events.settings_changed |= ui.checkbox(&mut settings.show_debug, "").changed();
            ui.end_row();

            ui.label("Live Feed");
            ui.checkbox(live, "");
            ui.end_row();
        });

    events
}

pub fn status_panel(ui: &mut Ui, state: Option<FrameState>, ratio: OpenRatio, error: Option<&str>) {
    ui.separator();
    ui.label(format!("Ratio: {}", ratio));
    let state_text = match state {
        Some(FrameState::Ready) => "Ready",
        Some(FrameState::Inert) => "Inert (invalid settings)",
        Some(FrameState::DataUnavailable) => "Waiting for data",
        Some(FrameState::InvalidViewport) => "Chart too small",
        None => "Not initialised",
    };
    ui.label(format!("State: {}", state_text));
    if let Some(err) = error {
        ui.label(RichText::new(err).color(UI_CONFIG.colors.error));
    }
}
