//! Host timer implementation
//!
//! Backed by `std::thread::sleep` and a monotonic `Instant`.

use crate::platform::traits::{SleepOutcome, TimerInterface};
use std::time::{Duration, Instant};

/// Host timer
///
/// Any shortfall between the requested and the measured sleep is reported as
/// `SleepOutcome::Interrupted`, so callers never have to trust the OS about
/// how long it actually slept.
#[derive(Debug)]
pub struct LinuxTimer {
    epoch: Instant,
}

impl LinuxTimer {
    /// Create a new timer; `now_us()` counts from this instant
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for LinuxTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for LinuxTimer {
    fn sleep(&mut self, duration: Duration) -> SleepOutcome {
        let start = Instant::now();
        std::thread::sleep(duration);
        let elapsed = start.elapsed();
        if elapsed < duration {
            SleepOutcome::Interrupted {
                remaining: duration - elapsed,
            }
        } else {
            SleepOutcome::Completed
        }
    }

    fn now_us(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_waits_at_least_requested() {
        let mut timer = LinuxTimer::new();
        let before = timer.now_us();
        assert_eq!(
            timer.sleep(Duration::from_millis(5)),
            SleepOutcome::Completed
        );
        assert!(timer.now_us() - before >= 5_000);
    }

    #[test]
    fn test_now_is_monotonic() {
        let timer = LinuxTimer::new();
        let a = timer.now_us();
        let b = timer.now_us();
        assert!(b >= a);
    }
}
