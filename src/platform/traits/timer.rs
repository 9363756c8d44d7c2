//! Timer interface trait

use std::time::Duration;

/// Result of a single platform sleep call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// The full duration elapsed
    Completed,
    /// The sleep was cut short; `remaining` has not elapsed yet
    Interrupted { remaining: Duration },
}

/// Timer interface trait
///
/// A single `sleep` call is allowed to return early (signal delivery, spurious
/// wakeups). Callers that need a guaranteed minimum wait go through
/// [`crate::core::delay::delay`], which resumes on `Interrupted`.
pub trait TimerInterface {
    /// Block the calling thread for up to `duration`
    fn sleep(&mut self, duration: Duration) -> SleepOutcome;

    /// Monotonic time since the timer was created, in microseconds
    fn now_us(&self) -> u64;

    /// Monotonic time since the timer was created, in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
