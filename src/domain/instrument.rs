use serde::{Deserialize, Serialize};

use crate::config::TickSize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instrument {
    pub name: String,
    pub tick_size: TickSize,
}

impl Instrument {
    pub fn new(name: impl Into<String>, tick_size: f64) -> Self {
        Self {
            name: name.into(),
            tick_size: TickSize::new(tick_size),
        }
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} (tick {})", self.name, self.tick_size)
    }
}
