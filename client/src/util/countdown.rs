//! Resend cool-down counter and the browser task that drives it.
//!
//! DESIGN
//! ======
//! `Cooldown` is a plain counter advanced by explicit `tick()` calls, so tests
//! drive it without a clock. `CountdownTask` is the only source of recurring
//! work in the verification flow: a `spawn_local` loop that sleeps one period
//! between ticks and exits once cancelled. Pages cancel it in `on_cleanup`.

#[cfg(test)]
#[path = "countdown_test.rs"]
mod countdown_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Seconds a user must wait before requesting another code.
pub const RESEND_COOLDOWN_SECS: u32 = 30;

/// Whole-second countdown; resend is enabled exactly when it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    initial: u32,
    remaining: u32,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::new(RESEND_COOLDOWN_SECS)
    }
}

impl Cooldown {
    /// A running countdown starting at `initial` seconds.
    #[must_use]
    pub fn new(initial: u32) -> Self {
        Self { initial, remaining: initial }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advance one second. Returns `true` if the counter changed.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Start over from the initial value.
    pub fn restart(&mut self) {
        self.remaining = self.initial;
    }
}

/// Cancellable periodic task.
///
/// Cloning shares the cancel flag; cancelling any clone stops the loop before
/// its next tick. Outside the browser the task never runs.
#[derive(Clone, Debug)]
pub struct CountdownTask {
    alive: Arc<AtomicBool>,
}

impl CountdownTask {
    /// Run `on_tick` every `period` until cancelled.
    pub fn spawn<F>(period: Duration, on_tick: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));

        #[cfg(feature = "hydrate")]
        {
            let alive_task = Arc::clone(&alive);
            let mut on_tick = on_tick;
            leptos::task::spawn_local(async move {
                loop {
                    gloo_timers::future::sleep(period).await;
                    if !alive_task.load(Ordering::Relaxed) {
                        break;
                    }
                    on_tick();
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (period, on_tick);
        }

        Self { alive }
    }

    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        !self.alive.load(Ordering::Relaxed)
    }
}
