use std::time::{Duration, Instant};

use eframe::egui::{CentralPanel, Context, SidePanel};
use eframe::Frame;

use crate::Cli;
use crate::config::{DEMO, OVERLAY_LAYOUT, OverlaySettings};
use crate::data::demo::{DemoFeed, demo_instruments, demo_provider};
use crate::data::{InMemoryProvider, MarketDataProvider};
use crate::engine::{FrameState, OpenRatio, SeriesRole, StrikeOverlay, Viewport};
use crate::ui::chart::show_candle_chart;
use crate::ui::painter::{EguiTextMeasure, paint_debug, paint_overlay};
use crate::ui::panels::{settings_panel, status_panel};
use crate::ui::ui_config::{UI_CONFIG, setup_custom_visuals};
use crate::utils::{TimeUtils, floor_to_minute, now_timestamp_ms};

/// Demo host: a futures candle chart with the strike overlay on top.
pub struct ChartApp {
    provider: InMemoryProvider,
    feed: DemoFeed,
    target_symbol: String,
    overlay: Option<StrikeOverlay>,
    /// Settings as edited in the side panel
    draft: OverlaySettings,
    symbol_input: String,
    error: Option<String>,
    live: bool,
    last_step: Instant,
    last_state: Option<FrameState>,
}

impl ChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<Self> {
        setup_custom_visuals(&cc.egui_ctx);

        let mut draft = match &args.config {
            Some(path) => OverlaySettings::load_json(path)?,
            None => OverlaySettings {
                line_color: UI_CONFIG.chart.demo_line_color,
                ..Default::default()
            },
        };
        if let Some(etf) = &args.etf {
            draft.etf_symbol = etf.clone();
        }

        let now = floor_to_minute(now_timestamp_ms());
        let (provider, feed) = demo_provider(now, DEMO.history_bars)?;

        let mut app = Self {
            provider,
            feed,
            target_symbol: args.target.clone(),
            overlay: None,
            symbol_input: draft.etf_symbol.clone(),
            draft,
            error: None,
            live: true,
            last_step: Instant::now(),
            last_state: None,
        };
        app.reinit();
        Ok(app)
    }

    /// One minute past the latest generated bar, so history windows follow the demo feed.
    fn now_ms(&self) -> i64 {
        let (etf, _) = demo_instruments();
        self.provider
            .latest_bar(&etf, TimeUtils::MS_IN_MIN, i64::MIN)
            .map(|b| b.timestamp_ms + TimeUtils::MS_IN_MIN)
            .unwrap_or_else(now_timestamp_ms)
    }

    fn reinit(&mut self) {
        let now = self.now_ms();
        match StrikeOverlay::init(&self.provider, &self.target_symbol, self.draft.clone(), now) {
            Ok(overlay) => {
                self.overlay = Some(overlay);
                self.error = None;
            }
            Err(e) => {
                log::error!("Strike overlay init failed: {:#}", e);
                self.error = Some(format!("{:#}", e));
            }
        }
    }

    fn apply_draft(&mut self) {
        let now = self.now_ms();
        let Some(overlay) = self.overlay.as_mut() else {
            self.reinit();
            return;
        };
        match overlay.apply_settings(&self.provider, self.draft.clone(), now) {
            Ok(()) => self.error = None,
            Err(e) => {
                log::error!("Failed to apply settings: {:#}", e);
                self.error = Some(format!("{:#}", e));
                // Back to the last symbol that resolved
                self.draft.etf_symbol = overlay.settings().etf_symbol.clone();
                self.symbol_input = self.draft.etf_symbol.clone();
            }
        }
    }

    fn step_live_feed(&mut self) {
        if !self.live || self.last_step.elapsed() < Duration::from_millis(DEMO.live_step_ms) {
            return;
        }
        self.last_step = Instant::now();

        let (etf_bar, fut_bar) = self.feed.next_pair();
        let pushed = self
            .provider
            .push_bar(DEMO.etf.name, TimeUtils::MS_IN_MIN, etf_bar)
            .and_then(|_| {
                self.provider
                    .push_bar(DEMO.futures.name, TimeUtils::MS_IN_MIN, fut_bar)
            });
        if let Err(e) = pushed {
            log::warn!("Demo feed rejected bar: {:#}", e);
            return;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            let routed = [
                (DEMO.etf.name, SeriesRole::Reference, etf_bar),
                (DEMO.futures.name, SeriesRole::Target, fut_bar),
            ];
            for (symbol, role, bar) in routed {
                let matches = match role {
                    SeriesRole::Reference => overlay.reference().name.eq_ignore_ascii_case(symbol),
                    SeriesRole::Target => overlay.target().name.eq_ignore_ascii_case(symbol),
                };
                if matches && let Err(e) = overlay.on_bar(role, bar) {
                    log::warn!("Overlay rejected live bar: {:#}", e);
                }
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.step_live_feed();

        let ratio = self
            .overlay
            .as_ref()
            .map(|o| o.snapshot().ratio)
            .unwrap_or(OpenRatio::Undefined);

        SidePanel::left("settings_panel")
            .min_width(220.0)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                let events = settings_panel(ui, &mut self.draft, &mut self.symbol_input, &mut self.live);
                if events.settings_changed {
                    self.apply_draft();
                }
                status_panel(ui, self.last_state, ratio, self.error.as_deref());
            });

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                let Some(overlay) = self.overlay.as_mut() else {
                    self.last_state = None;
                    return;
                };

                let transform = show_candle_chart(ui, overlay.target_history());
                let rect = *transform.frame();
                let painter = ui.painter().with_clip_rect(rect);
                let viewport = Viewport::from_rect(rect);

                let label_measure = EguiTextMeasure::new(&painter, OVERLAY_LAYOUT.label_font_size);
                let frame = crate::trace_time!("Strike overlay paint", 2000, {
                    overlay.paint(|price| transform.position_from_point_y(price), viewport, &label_measure)
                });
                paint_overlay(&painter, &frame, overlay.settings());

                let debug_measure = EguiTextMeasure::new(&painter, OVERLAY_LAYOUT.debug_font_size);
                paint_debug(&painter, &overlay.debug_lines(viewport, &debug_measure));

                self.last_state = Some(frame.state);
            });

        if self.live {
            ctx.request_repaint_after(Duration::from_millis(DEMO.live_step_ms));
        }
    }
}
