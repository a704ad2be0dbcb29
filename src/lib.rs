// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

use std::path::PathBuf;

// Re-export commonly used types outside of crate
pub use config::OverlaySettings;
pub use domain::{Bar, Instrument, PriceSeries};
pub use engine::{
    OverlayError, StrikeCalculator, StrikeLevel, StrikeOverlay, Viewport, layout_overlay,
};
pub use ui::ChartApp;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reference ETF symbol (overrides the settings file)
    #[arg(long)]
    pub etf: Option<String>,

    /// Futures symbol being charted
    #[arg(long, default_value = "ES")]
    pub target: String,

    /// JSON file with overlay settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<ChartApp> {
    ChartApp::new(cc, args)
}
