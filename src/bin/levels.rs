//! Headless strike table: prints the ladder the overlay would draw.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

use strike_overlay::config::{DEMO, OpenPrice, OverlaySettings, PriceLike, TickSize};
use strike_overlay::data::MarketDataProvider;
use strike_overlay::data::demo::demo_provider;
use strike_overlay::engine::{
    FixedWidthMeasure, LinearPriceScale, StrikeCalculator, StrikeLevel, Viewport, layout_overlay,
};
use strike_overlay::utils::{TimeUtils, epoch_ms_to_utc, floor_to_minute, now_timestamp_ms};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print ETF strike levels mapped onto a futures price grid")]
struct Args {
    /// JSON file with overlay settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference ETF symbol
    #[arg(long)]
    etf: Option<String>,

    /// Futures symbol
    #[arg(long, default_value = "ES")]
    target: String,

    #[arg(long)]
    half_width: Option<i32>,

    /// Futures tick size (defaults to the demo instrument's)
    #[arg(long)]
    tick_size: Option<f64>,

    /// Latest ETF open; with --target-open, skips the demo feed
    #[arg(long)]
    etf_open: Option<f64>,

    #[arg(long)]
    target_open: Option<f64>,

    /// Chart height in px; enables the pixel layout columns
    #[arg(long)]
    height: Option<f32>,

    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Horizontal offset in px (overrides the settings file)
    #[arg(long)]
    offset: Option<i32>,

    /// Lowest price shown by the chart (default: ladder low minus 5%)
    #[arg(long)]
    price_low: Option<f64>,

    #[arg(long)]
    price_high: Option<f64>,

    /// Emit JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Strike")]
    strike: i64,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Target Price")]
    target_price: String,
    #[tabled(rename = "Y (px)")]
    y: String,
}

fn latest_opens(args: &Args, etf_symbol: &str) -> Result<(Option<OpenPrice>, Option<OpenPrice>)> {
    if let (Some(etf), Some(target)) = (args.etf_open, args.target_open) {
        return Ok((Some(OpenPrice::new(etf)), Some(OpenPrice::new(target))));
    }
    if args.etf_open.is_some() || args.target_open.is_some() {
        bail!("--etf-open and --target-open must be given together");
    }

    let now = floor_to_minute(now_timestamp_ms());
    let (provider, _) = demo_provider(now, DEMO.history_bars)?;
    let etf = provider.resolve_instrument(etf_symbol)?;
    let target = provider.resolve_instrument(&args.target)?;
    let since = now - TimeUtils::MS_IN_D;
    let etf_bar = provider.latest_bar(&etf, TimeUtils::MS_IN_MIN, since);
    let target_bar = provider.latest_bar(&target, TimeUtils::MS_IN_MIN, since);
    if let Some(bar) = &target_bar {
        log::info!("Demo opens as of {} UTC", epoch_ms_to_utc(bar.timestamp_ms));
    }
    Ok((etf_bar.map(|b| b.open), target_bar.map(|b| b.open)))
}

fn pixel_rows(args: &Args, levels: &[StrikeLevel], offset: i32) -> Result<HashMap<i64, f32>> {
    let Some(height) = args.height else {
        return Ok(HashMap::new());
    };
    let low = levels
        .first()
        .map(|l| l.target_price.value())
        .unwrap_or_default();
    let high = levels
        .last()
        .map(|l| l.target_price.value())
        .unwrap_or_default();
    let viewport = Viewport::new(0.0, height, 0.0, args.width);
    let scale = match (args.price_low, args.price_high) {
        (Some(lo), Some(hi)) => LinearPriceScale::new(lo, hi, viewport),
        _ => LinearPriceScale::padded(low, high, 0.05, viewport),
    };
    log::info!(
        "Chart window {:.2} .. {:.2} over {}px",
        scale.y_to_price(viewport.bottom),
        scale.y_to_price(viewport.top),
        height
    );

    let items = layout_overlay(
        levels,
        |p| scale.price_to_y(p),
        &viewport,
        offset as f32,
        &FixedWidthMeasure::LABEL,
    )?;
    Ok(items.into_iter().map(|i| (i.strike, i.line.y)).collect())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => OverlaySettings::load_json(path)?,
        None => OverlaySettings::default(),
    };
    if let Some(etf) = &args.etf {
        settings.etf_symbol = etf.clone();
    }
    if let Some(hw) = args.half_width {
        settings.strike_half_width = hw;
    }
    if let Some(offset) = args.offset {
        settings.horizontal_offset = offset;
    }
    settings.validate().context("Invalid overlay settings")?;

    let tick = TickSize::new(args.tick_size.unwrap_or(DEMO.futures.tick_size));
    let calc = StrikeCalculator::new(settings.strike_half_width, tick)
        .context("Invalid strike calculator configuration")?;

    let (etf_open, target_open) = latest_opens(&args, &settings.etf_symbol)?;
    let levels = match calc.levels_from_opens(&settings.etf_symbol, etf_open, target_open) {
        Ok(levels) => levels,
        Err(e) if e.is_silent() => {
            log::warn!("No strike levels: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    log::info!(
        "{} open {} / {} open {} -> {} levels",
        settings.etf_symbol,
        etf_open.map(|o| o.to_string()).unwrap_or_default(),
        args.target,
        target_open.map(|o| o.to_string()).unwrap_or_default(),
        levels.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
        return Ok(());
    }

    let ys = pixel_rows(&args, &levels, settings.horizontal_offset)?;
    let rows: Vec<LevelRow> = levels
        .iter()
        .rev()
        .map(|level| LevelRow {
            strike: level.reference_strike,
            label: level.label.clone(),
            target_price: level.target_price.format_on_grid(tick),
            y: match (args.height, ys.get(&level.reference_strike)) {
                (None, _) => "-".to_string(),
                (Some(_), Some(y)) => format!("{:.1}", y),
                (Some(_), None) => "clipped".to_string(),
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}
