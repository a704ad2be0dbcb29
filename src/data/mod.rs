pub mod demo;
mod provider;

pub use provider::{InMemoryProvider, MarketDataProvider};
