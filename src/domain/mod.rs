// Domain types and value objects
mod bar;
mod instrument;
mod price_series;

// Re-export commonly used types to the world
pub use bar::{Bar, BarType};
pub use instrument::Instrument;
pub use price_series::PriceSeries;
