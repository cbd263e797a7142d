use std::time::{SystemTime, UNIX_EPOCH};
use lp_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    /// Unix milliseconds; a clock set before the epoch reads as 0.
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}
