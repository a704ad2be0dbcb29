use strike_overlay::config::{OpenPrice, OverlaySettings, PriceLike, TickSize};
use strike_overlay::data::demo::demo_provider;
use strike_overlay::data::{InMemoryProvider, MarketDataProvider};
use strike_overlay::domain::{Bar, Instrument};
use strike_overlay::engine::{
    FixedWidthMeasure, FrameState, LinearPriceScale, OverlayError, StrikeCalculator,
    StrikeOverlay, TextMeasure, Viewport, layout_overlay,
};

const MINUTE: i64 = 60_000;

fn two_symbol_provider() -> InMemoryProvider {
    let mut p = InMemoryProvider::new()
        .with_instrument(Instrument::new("SPY", 0.01))
        .with_instrument(Instrument::new("QQQ", 0.01))
        .with_instrument(Instrument::new("ES", 0.25));
    p.push_bar("SPY", MINUTE, Bar::flat(0, 500.37)).unwrap();
    p.push_bar("QQQ", MINUTE, Bar::flat(0, 440.80)).unwrap();
    p.push_bar("ES", MINUTE, Bar::flat(0, 5750.10)).unwrap();
    p
}

#[test]
fn calculator_to_layout_places_labels_at_the_right_edge() {
    let calc = StrikeCalculator::new(2, TickSize::new(0.25)).unwrap();
    let levels = calc
        .levels_from_opens(
            "SPY",
            Some(OpenPrice::new(500.37)),
            Some(OpenPrice::new(5750.10)),
        )
        .unwrap();
    assert_eq!(levels.len(), 5);
    assert_eq!(levels[2].label, "SPY 500");
    assert!((levels[2].target_price.value() - 5745.75).abs() < 1e-9);

    let viewport = Viewport::new(0.0, 400.0, 0.0, 800.0);
    let scale = LinearPriceScale::new(5700.0, 5800.0, viewport);
    let measure = FixedWidthMeasure::LABEL;
    let items =
        layout_overlay(&levels, |p| scale.price_to_y(p), &viewport, -20.0, &measure).unwrap();
    assert_eq!(items.len(), 5);

    let mid = &items[2];
    assert_eq!(mid.line.x_start, -20.0);
    assert_eq!(mid.line.x_end, 780.0);
    let size = measure.measure("SPY 500");
    assert!((mid.label.anchor.x - (780.0 - size.width - 5.0)).abs() < 1e-4);
    assert!((mid.label.anchor.y - (mid.line.y - size.height / 2.0)).abs() < 1e-4);
    assert!(mid.label.pill.rect.contains(mid.label.anchor));
}

#[test]
fn narrow_price_window_clips_outer_levels() {
    let calc = StrikeCalculator::new(3, TickSize::new(0.25)).unwrap();
    let levels = calc
        .levels_from_opens(
            "SPY",
            Some(OpenPrice::new(500.37)),
            Some(OpenPrice::new(5750.10)),
        )
        .unwrap();
    let viewport = Viewport::new(0.0, 300.0, 0.0, 600.0);
    // About +/- one strike step around 500
    let scale = LinearPriceScale::new(5730.0, 5760.0, viewport);
    let items = layout_overlay(
        &levels,
        |p| scale.price_to_y(p),
        &viewport,
        0.0,
        &FixedWidthMeasure::LABEL,
    )
    .unwrap();
    let strikes: Vec<i64> = items.iter().map(|i| i.strike).collect();
    assert_eq!(strikes, vec![499, 500, 501]);
    assert!(items.iter().all(|i| viewport.contains_y(i.line.y)));
}

#[test]
fn zero_half_width_is_rejected_by_calculator_and_overlay() {
    assert!(matches!(
        StrikeCalculator::new(0, TickSize::new(0.25)),
        Err(OverlayError::InvalidConfiguration(_))
    ));

    let p = two_symbol_provider();
    let settings = OverlaySettings {
        strike_half_width: 0,
        ..Default::default()
    };
    let mut overlay = StrikeOverlay::init(&p, "ES", settings, 10 * MINUTE).unwrap();
    let frame = overlay.paint(
        |_| 10.0,
        Viewport::new(0.0, 100.0, 0.0, 100.0),
        &FixedWidthMeasure::LABEL,
    );
    assert_eq!(frame.state, FrameState::Inert);
}

#[test]
fn empty_target_series_yields_no_levels() {
    let mut p = InMemoryProvider::new()
        .with_instrument(Instrument::new("SPY", 0.01))
        .with_instrument(Instrument::new("ES", 0.25));
    p.push_bar("SPY", MINUTE, Bar::flat(0, 500.37)).unwrap();

    let mut overlay =
        StrikeOverlay::init(&p, "ES", OverlaySettings::default(), 10 * MINUTE).unwrap();
    assert_eq!(overlay.levels(), Err(OverlayError::DataUnavailable));
    let frame = overlay.paint(
        |_| 10.0,
        Viewport::new(0.0, 100.0, 0.0, 100.0),
        &FixedWidthMeasure::LABEL,
    );
    assert_eq!(frame.state, FrameState::DataUnavailable);
    assert!(frame.items.is_empty());
}

#[test]
fn switching_reference_symbol_reloads_history() {
    let p = two_symbol_provider();
    let mut overlay =
        StrikeOverlay::init(&p, "es", OverlaySettings::default(), 10 * MINUTE).unwrap();
    assert_eq!(overlay.reference().name, "SPY");
    assert_eq!(overlay.levels().unwrap()[7].reference_strike, 500);

    let qqq = OverlaySettings {
        etf_symbol: "qqq".to_string(),
        ..Default::default()
    };
    overlay.apply_settings(&p, qqq, 10 * MINUTE).unwrap();
    assert_eq!(overlay.reference().name, "QQQ");
    let levels = overlay.levels().unwrap();
    assert_eq!(levels[7].reference_strike, 440);
    assert_eq!(levels[7].label, "QQQ 440");
}

#[test]
fn demo_feed_drives_a_ready_frame() {
    let end = 1_700_000_040_000 - (1_700_000_040_000 % MINUTE);
    let (provider, mut feed) = demo_provider(end, 120).unwrap();
    let target = provider.resolve_instrument("ES").unwrap();
    assert!(provider.latest_bar(&target, MINUTE, 0).is_some());

    let mut overlay =
        StrikeOverlay::init(&provider, "ES", OverlaySettings::default(), end).unwrap();
    let levels = overlay.levels().unwrap();
    assert_eq!(levels.len(), 15);
    for pair in levels.windows(2) {
        assert!(pair[0].target_price.value() <= pair[1].target_price.value());
    }

    let low = levels[0].target_price.value();
    let high = levels[14].target_price.value();
    let viewport = Viewport::new(0.0, 500.0, 0.0, 1000.0);
    let scale = LinearPriceScale::padded(low, high, 0.05, viewport);
    let frame = overlay.paint(|p| scale.price_to_y(p), viewport, &FixedWidthMeasure::LABEL);
    assert_eq!(frame.state, FrameState::Ready);
    assert_eq!(frame.items.len(), 15);

    let (etf_bar, fut_bar) = feed.next_pair();
    overlay
        .on_bar(strike_overlay::engine::SeriesRole::Reference, etf_bar)
        .unwrap();
    overlay
        .on_bar(strike_overlay::engine::SeriesRole::Target, fut_bar)
        .unwrap();
    assert_eq!(overlay.target_history().len(), 121);
}
