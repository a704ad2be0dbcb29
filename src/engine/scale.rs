use crate::engine::layout::Viewport;

/// Linear price axis: `price_top` maps to `viewport.top`, `price_bottom` to
/// `viewport.bottom`. Hosts with their own coordinate converter do not need this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearPriceScale {
    pub price_top: f64,
    pub price_bottom: f64,
    pub viewport: Viewport,
}

impl LinearPriceScale {
    pub fn new(price_low: f64, price_high: f64, viewport: Viewport) -> Self {
        Self {
            price_top: price_high,
            price_bottom: price_low,
            viewport,
        }
    }

    /// Pads the price range by `pad_pct` of its span on both ends.
    pub fn padded(price_low: f64, price_high: f64, pad_pct: f64, viewport: Viewport) -> Self {
        let pad = (price_high - price_low).abs() * pad_pct;
        Self::new(price_low - pad, price_high + pad, viewport)
    }

    pub fn price_to_y(&self, price: f64) -> f32 {
        let span = self.price_top - self.price_bottom;
        if span.abs() < f64::EPSILON {
            return (self.viewport.top + self.viewport.bottom) / 2.0;
        }
        let frac = (self.price_top - price) / span;
        self.viewport.top + (frac as f32) * self.viewport.height()
    }

    pub fn y_to_price(&self, y: f32) -> f64 {
        let height = self.viewport.height();
        if height <= 0.0 {
            return self.price_top;
        }
        let frac = ((y - self.viewport.top) / height) as f64;
        self.price_top - frac * (self.price_top - self.price_bottom)
    }
}
