pub struct DemoInstrument {
    pub name: &'static str,
    pub tick_size: f64,
    /// Price the synthetic walk oscillates around
    pub anchor_price: f64,
}

pub struct DemoConfig {
    pub etf: DemoInstrument,
    pub futures: DemoInstrument,
    /// Number of 1-minute bars generated up front
    pub history_bars: usize,
    /// Wall-clock milliseconds between live bars in the GUI
    pub live_step_ms: u64,
}

pub const DEMO: DemoConfig = DemoConfig {
    etf: DemoInstrument {
        name: "SPY",
        tick_size: 0.01,
        anchor_price: 500.37,
    },
    futures: DemoInstrument {
        name: "ES",
        tick_size: 0.25,
        anchor_price: 5750.10,
    },
    history_bars: 390, // One regular session
    live_step_ms: 1000,
};
