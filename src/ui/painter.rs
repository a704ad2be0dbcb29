//! egui host surface for the overlay geometry.

use eframe::egui::{Align2, Color32, FontId, Painter, Shape, Stroke, pos2};

use crate::config::{OVERLAY_LAYOUT, OverlaySettings};
use crate::engine::{DebugLine, OverlayFrame, TextMeasure, TextSize};

/// Font metrics from egui's text layout.
pub struct EguiTextMeasure<'a> {
    painter: &'a Painter,
    font_id: FontId,
}

impl<'a> EguiTextMeasure<'a> {
    pub fn new(painter: &'a Painter, font_size: f32) -> Self {
        Self {
            painter,
            font_id: FontId::proportional(font_size),
        }
    }
}

impl TextMeasure for EguiTextMeasure<'_> {
    fn measure(&self, text: &str) -> TextSize {
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), self.font_id.clone(), Color32::WHITE);
        let size = galley.size();
        TextSize::new(size.x, size.y)
    }
}

/// Splits `[x_start, x_end]` into the "on" runs of a dash pattern whose
/// lengths are multiples of `thickness`. An empty pattern is one solid run.
pub fn dash_segments(x_start: f32, x_end: f32, pattern: &[f32], thickness: f32) -> Vec<(f32, f32)> {
    if x_end <= x_start {
        return Vec::new();
    }
    let unit = thickness.max(1.0);
    if pattern.is_empty() || pattern.iter().all(|p| *p <= 0.0) {
        return vec![(x_start, x_end)];
    }

    let mut segments = Vec::new();
    let mut x = x_start;
    let mut idx = 0;
    while x < x_end {
        let run = (pattern[idx % pattern.len()] * unit).max(f32::EPSILON);
        let next = (x + run).min(x_end);
        if idx % 2 == 0 {
            segments.push((x, next));
        }
        x = next;
        idx += 1;
    }
    segments
}

pub fn paint_overlay(painter: &Painter, frame: &OverlayFrame, settings: &OverlaySettings) {
    let thickness = settings.line_thickness as f32;
    let stroke = Stroke::new(thickness, settings.line_color);
    let font_id = FontId::proportional(OVERLAY_LAYOUT.label_font_size);
    let pattern = settings.line_style.pattern();

    for item in &frame.items {
        let y = item.line.y;

        if settings.line_color != Color32::TRANSPARENT {
            for (x0, x1) in dash_segments(item.line.x_start, item.line.x_end, pattern, thickness) {
                painter.line_segment([pos2(x0, y), pos2(x1, y)], stroke);
            }
        }

        if settings.label_bg_color != Color32::TRANSPARENT {
            let outline = item.label.pill.to_polyline(OVERLAY_LAYOUT.arc_segments);
            painter.add(Shape::convex_polygon(
                outline,
                settings.label_bg_color,
                Stroke::NONE,
            ));
        }

        painter.text(
            item.label.anchor,
            Align2::LEFT_TOP,
            &item.label.text,
            font_id.clone(),
            settings.label_color,
        );
    }
}

pub fn paint_debug(painter: &Painter, lines: &[DebugLine]) {
    let font_id = FontId::proportional(OVERLAY_LAYOUT.debug_font_size);
    for line in lines {
        painter.text(
            line.pos,
            Align2::LEFT_TOP,
            &line.text,
            font_id.clone(),
            Color32::WHITE,
        );
    }
}
