use eframe::egui::{Pos2, Rect, pos2, vec2};

/// One quarter-circle of a rounded rectangle. Angles are in degrees, measured
/// clockwise from +x in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerArc {
    /// Bounding square of the full circle the arc belongs to
    pub bounds: Rect,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl CornerArc {
    pub fn radius(&self) -> f32 {
        self.bounds.width() / 2.0
    }

    pub fn point_at(&self, deg: f32) -> Pos2 {
        let c = self.bounds.center();
        let r = self.radius();
        let rad = deg.to_radians();
        pos2(c.x + r * rad.cos(), c.y + r * rad.sin())
    }
}

/// Closed pill contour: four 90 degree arcs, top-left, top-right, bottom-right,
/// bottom-left, joined by straight edges.
#[derive(Debug, Clone, PartialEq)]
pub struct PillPath {
    pub rect: Rect,
    pub radius: f32,
    pub arcs: [CornerArc; 4],
}

impl PillPath {
    /// Radius is clamped to half the shorter side.
    pub fn new(rect: Rect, radius: f32) -> Self {
        let radius = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
        let d = radius * 2.0;
        let square = |x: f32, y: f32| Rect::from_min_size(pos2(x, y), vec2(d, d));

        let arcs = [
            CornerArc {
                bounds: square(rect.min.x, rect.min.y),
                start_deg: 180.0,
                sweep_deg: 90.0,
            },
            CornerArc {
                bounds: square(rect.max.x - d, rect.min.y),
                start_deg: 270.0,
                sweep_deg: 90.0,
            },
            CornerArc {
                bounds: square(rect.max.x - d, rect.max.y - d),
                start_deg: 0.0,
                sweep_deg: 90.0,
            },
            CornerArc {
                bounds: square(rect.min.x, rect.max.y - d),
                start_deg: 90.0,
                sweep_deg: 90.0,
            },
        ];

        Self { rect, radius, arcs }
    }

    /// Fully rounded short ends: radius is half the height.
    pub fn pill(rect: Rect) -> Self {
        Self::new(rect, rect.height() / 2.0)
    }

    /// Samples the contour clockwise. Consecutive coincident points are merged,
    /// so a zero radius yields the four corners.
    pub fn to_polyline(&self, segments_per_arc: usize) -> Vec<Pos2> {
        let segments = segments_per_arc.max(1);
        let mut points: Vec<Pos2> = Vec::with_capacity(4 * (segments + 1));

        for arc in &self.arcs {
            for i in 0..=segments {
                let t = i as f32 / segments as f32;
                let p = arc.point_at(arc.start_deg + arc.sweep_deg * t);
                let duplicate = points
                    .last()
                    .is_some_and(|last| last.distance(p) < 1e-3);
                if !duplicate {
                    points.push(p);
                }
            }
        }

        if points.len() > 1 && points[0].distance(points[points.len() - 1]) < 1e-3 {
            points.pop();
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pill() -> PillPath {
        PillPath::pill(Rect::from_min_size(pos2(10.0, 20.0), vec2(40.0, 12.0)))
    }

    #[test]
    fn radius_is_half_height() {
        let p = pill();
        assert_eq!(p.radius, 6.0);
        for arc in &p.arcs {
            assert_eq!(arc.bounds.width(), 12.0);
            assert_eq!(arc.sweep_deg, 90.0);
        }
    }

    #[test]
    fn arcs_hug_the_corners() {
        let p = pill();
        assert_eq!(p.arcs[0].bounds.min, pos2(10.0, 20.0));
        assert_eq!(p.arcs[1].bounds.min, pos2(38.0, 20.0));
        assert_eq!(p.arcs[2].bounds.max, pos2(50.0, 32.0));
        assert_eq!(p.arcs[3].bounds.min, pos2(10.0, 20.0));
        // Top-left arc ends on the top edge
        let end = p.arcs[0].point_at(270.0);
        assert!((end.y - 20.0).abs() < 1e-4);
        assert!((end.x - 16.0).abs() < 1e-4);
    }

    #[test]
    fn polyline_stays_inside_rect() {
        let p = pill();
        let pts = p.to_polyline(8);
        assert!(pts.len() >= 4 * 8);
        let grown = p.rect.expand(1e-3);
        assert!(pts.iter().all(|pt| grown.contains(*pt)));
    }

    #[test]
    fn radius_clamped_to_short_side() {
        let p = PillPath::new(Rect::from_min_size(pos2(0.0, 0.0), vec2(6.0, 20.0)), 10.0);
        assert_eq!(p.radius, 3.0);
    }

    #[test]
    fn square_corners_collapse_to_four_points() {
        let p = PillPath::new(Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 4.0)), 0.0);
        assert_eq!(p.to_polyline(4).len(), 4);
    }
}
