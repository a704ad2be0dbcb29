//! User inputs for the strike overlay.
//!
//! These are read once per render. The calculator only looks at the symbol and
//! the half-width, the layout engine only at the offset; everything else is
//! styling handed straight to the painter.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use strum_macros::{Display, EnumIter};

use anyhow::{Context, Result};

use crate::engine::OverlayError;

/// Stored in settings files as the host's numeric dash-style id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, Default,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum LineStylePreset {
    Solid,
    #[default]
    Dash,
    Dot,
    #[strum(to_string = "Dash Dot")]
    DashDot,
    #[strum(to_string = "Dash Dot Dot")]
    DashDotDot,
}

impl LineStylePreset {
    /// Numeric ids as stored by the chart host (0 = Solid .. 4 = DashDotDot).
    pub fn id(self) -> i32 {
        match self {
            Self::Solid => 0,
            Self::Dash => 1,
            Self::Dot => 2,
            Self::DashDot => 3,
            Self::DashDotDot => 4,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Solid),
            1 => Some(Self::Dash),
            2 => Some(Self::Dot),
            3 => Some(Self::DashDot),
            4 => Some(Self::DashDotDot),
            _ => None,
        }
    }

    /// Dash pattern in multiples of the line thickness: alternating on/off runs.
    /// Empty means a continuous line.
    pub fn pattern(self) -> &'static [f32] {
        match self {
            Self::Solid => &[],
            Self::Dash => &[3.0, 1.0],
            Self::Dot => &[1.0, 1.0],
            Self::DashDot => &[3.0, 1.0, 1.0, 1.0],
            Self::DashDotDot => &[3.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl From<LineStylePreset> for i32 {
    fn from(style: LineStylePreset) -> Self {
        style.id()
    }
}

impl TryFrom<i32> for LineStylePreset {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown line style id {}", id))
    }
}

/// Recognized ranges for the numeric inputs.
pub struct SettingsLimits {
    pub strike_half_width: RangeInclusive<i32>,
    pub line_thickness: RangeInclusive<i32>,
    pub horizontal_offset: RangeInclusive<i32>,
}

pub const SETTINGS_LIMITS: SettingsLimits = SettingsLimits {
    strike_half_width: 1..=100,
    line_thickness: 1..=10,
    horizontal_offset: -500..=500,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    /// Reference (ETF) instrument whose open anchors the strike grid
    pub etf_symbol: String,
    pub strike_half_width: i32,
    pub line_color: Color32,
    pub line_style: LineStylePreset,
    pub line_thickness: i32,
    pub label_color: Color32,
    pub label_bg_color: Color32,
    /// Horizontal shift of lines and labels, in pixels
    pub horizontal_offset: i32,
    pub show_debug: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            etf_symbol: "SPY".to_string(),
            strike_half_width: 7,
            line_color: Color32::TRANSPARENT,
            line_style: LineStylePreset::Dash,
            line_thickness: 1,
            label_color: Color32::from_rgb(76, 175, 80), // #4caf50
            label_bg_color: Color32::TRANSPARENT,
            horizontal_offset: -20,
            show_debug: false,
        }
    }
}

impl OverlaySettings {
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.etf_symbol.trim().is_empty() {
            return Err(OverlayError::InvalidConfiguration(
                "ETF symbol is empty".to_string(),
            ));
        }
        if !SETTINGS_LIMITS
            .strike_half_width
            .contains(&self.strike_half_width)
        {
            return Err(OverlayError::InvalidConfiguration(format!(
                "strike half-width {} outside {:?}",
                self.strike_half_width, SETTINGS_LIMITS.strike_half_width
            )));
        }
        if !SETTINGS_LIMITS.line_thickness.contains(&self.line_thickness) {
            return Err(OverlayError::InvalidConfiguration(format!(
                "line thickness {} outside {:?}",
                self.line_thickness, SETTINGS_LIMITS.line_thickness
            )));
        }
        if !SETTINGS_LIMITS
            .horizontal_offset
            .contains(&self.horizontal_offset)
        {
            return Err(OverlayError::InvalidConfiguration(format!(
                "horizontal offset {} outside {:?}",
                self.horizontal_offset, SETTINGS_LIMITS.horizontal_offset
            )));
        }
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn defaults_are_valid() {
        let settings = OverlaySettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.etf_symbol, "SPY");
        assert_eq!(settings.strike_half_width, 7);
        assert_eq!(settings.horizontal_offset, -20);
        assert_eq!(settings.line_style, LineStylePreset::Dash);
    }

    #[test]
    fn zero_half_width_is_invalid() {
        let settings = OverlaySettings {
            strike_half_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(OverlayError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn out_of_range_inputs_are_invalid() {
        for settings in [
            OverlaySettings {
                strike_half_width: 101,
                ..Default::default()
            },
            OverlaySettings {
                line_thickness: 11,
                ..Default::default()
            },
            OverlaySettings {
                horizontal_offset: -501,
                ..Default::default()
            },
            OverlaySettings {
                etf_symbol: "  ".to_string(),
                ..Default::default()
            },
        ] {
            assert!(settings.validate().is_err(), "{settings:?}");
        }
    }

    #[test]
    fn line_style_ids_round_trip() {
        for style in LineStylePreset::iter() {
            assert_eq!(LineStylePreset::from_id(style.id()), Some(style));
        }
        assert_eq!(LineStylePreset::from_id(7), None);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: OverlaySettings =
            serde_json::from_str(r#"{ "etf_symbol": "QQQ", "strike_half_width": 3 }"#).unwrap();
        assert_eq!(settings.etf_symbol, "QQQ");
        assert_eq!(settings.strike_half_width, 3);
        assert_eq!(settings.line_thickness, 1);
        assert_eq!(settings.label_color, Color32::from_rgb(76, 175, 80));
    }

    #[test]
    fn line_style_is_stored_as_numeric_id() {
        let settings: OverlaySettings = serde_json::from_str(r#"{ "line_style": 3 }"#).unwrap();
        assert_eq!(settings.line_style, LineStylePreset::DashDot);

        let json = serde_json::to_value(&OverlaySettings::default()).unwrap();
        assert_eq!(json["line_style"], 1);

        assert!(serde_json::from_str::<OverlaySettings>(r#"{ "line_style": 9 }"#).is_err());
    }
}
