mod perf;
mod time_utils;

pub use time_utils::{
    TimeUtils, epoch_ms_to_clock, epoch_ms_to_utc, floor_to_minute, now_timestamp_ms,
};
