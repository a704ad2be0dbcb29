use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const CHART_TIME_FORMAT: &str = "%H:%M";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Floors a timestamp to the start of its minute.
pub fn floor_to_minute(epoch_ms: i64) -> i64 {
    epoch_ms.div_euclid(TimeUtils::MS_IN_MIN) * TimeUtils::MS_IN_MIN
}

fn format_epoch_ms(epoch_ms: i64, fmt: &str) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(fmt).to_string(),
        None => "--".to_string(),
    }
}

/// "14:05" style label for the chart's time axis (UTC).
pub fn epoch_ms_to_clock(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::CHART_TIME_FORMAT)
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::STANDARD_TIME_FORMAT)
}
