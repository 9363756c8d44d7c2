//! Blocking millisecond delay
//!
//! Gates hardware settling times (SET/RESET capacitor charge, data-ready
//! polling), so it must never return before the full duration has elapsed.

use crate::error::{Error, Result};
use crate::platform::traits::{SleepOutcome, TimerInterface};
use std::time::Duration;

/// Sleep for at least `milliseconds`
///
/// An interrupted platform sleep is resumed for the remaining time.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for a negative duration, without sleeping.
pub fn delay<T: TimerInterface>(timer: &mut T, milliseconds: i64) -> Result<()> {
    if milliseconds < 0 {
        return Err(Error::InvalidArgument(format!(
            "delay of {milliseconds} ms is negative"
        )));
    }

    let mut remaining = Duration::from_millis(milliseconds as u64);
    loop {
        match timer.sleep(remaining) {
            SleepOutcome::Completed => return Ok(()),
            SleepOutcome::Interrupted { remaining: left } => {
                crate::log_trace!("delay interrupted, {} us left", left.as_micros());
                remaining = left;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockTimer;

    #[test]
    fn test_delay_elapses_requested_time() {
        let mut timer = MockTimer::new();
        delay(&mut timer, 60).unwrap();
        assert_eq!(timer.now_ms(), 60);
        assert_eq!(timer.sleeps(), &[Duration::from_millis(60)]);
    }

    #[test]
    fn test_delay_zero() {
        let mut timer = MockTimer::new();
        delay(&mut timer, 0).unwrap();
        assert_eq!(timer.now_us(), 0);
    }

    #[test]
    fn test_delay_negative_is_rejected_without_sleeping() {
        let mut timer = MockTimer::new();
        let result = delay(&mut timer, -1);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert!(timer.sleeps().is_empty());
        assert_eq!(timer.now_us(), 0);
    }

    #[test]
    fn test_delay_resumes_after_interruption() {
        let mut timer = MockTimer::new();
        timer.interrupt_after(Duration::from_millis(10));
        timer.interrupt_after(Duration::from_millis(5));

        delay(&mut timer, 25).unwrap();

        assert!(timer.now_ms() >= 25);
        assert_eq!(
            timer.sleeps(),
            &[
                Duration::from_millis(25),
                Duration::from_millis(15),
                Duration::from_millis(10)
            ]
        );
    }

    #[test]
    fn test_delay_on_host_timer() {
        let mut timer = crate::platform::linux::LinuxTimer::new();
        let start = std::time::Instant::now();
        delay(&mut timer, 3).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(3));
    }
}
