//! Mock Timer implementation for testing

use crate::platform::traits::{SleepOutcome, TimerInterface};
use std::collections::VecDeque;
use std::time::Duration;

/// Mock Timer implementation
///
/// Uses simulated time: `sleep` advances the clock instead of blocking.
/// Sleeps can be scripted to be interrupted part way through.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
    sleeps: Vec<Duration>,
    interruptions: VecDeque<Duration>,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self {
            now_us: 0,
            sleeps: Vec::new(),
            interruptions: VecDeque::new(),
        }
    }

    /// Interrupt the next sleep after `after` has elapsed
    ///
    /// Calls stack: each queued entry interrupts one subsequent sleep.
    pub fn interrupt_after(&mut self, after: Duration) {
        self.interruptions.push_back(after);
    }

    /// Every duration passed to `sleep`, in call order
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn sleep(&mut self, duration: Duration) -> SleepOutcome {
        self.sleeps.push(duration);
        match self.interruptions.pop_front() {
            Some(after) if after < duration => {
                self.now_us += after.as_micros() as u64;
                SleepOutcome::Interrupted {
                    remaining: duration - after,
                }
            }
            _ => {
                self.now_us += duration.as_micros() as u64;
                SleepOutcome::Completed
            }
        }
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
