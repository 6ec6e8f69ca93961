//! Process-wide fixed-window limiter for upstream calls.
//!
//! A single counter admits at most `capacity` calls and is reset to zero by a
//! background task every `window`. There is no gradual refill: a burst can use
//! the whole budget right after a reset and then nothing is admitted until the
//! next one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Reasons a limiter cannot be started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimiterError {
    #[error("limiter window must be longer than zero")]
    ZeroWindow,

    #[error("limiter needs a running tokio runtime for its reset task")]
    NoRuntime,
}

/// Fixed-window call budget shared by all callers.
#[derive(Debug)]
pub struct GlobalLimiter {
    capacity: u32,
    window: Duration,
    consumed: Mutex<u32>,
}

impl GlobalLimiter {
    /// Creates the limiter and starts its reset task on the current tokio runtime.
    ///
    /// The task exits once the last `Arc` to the limiter is dropped.
    /// A capacity of 0 rejects every call. A zero window, or a call made
    /// outside a runtime, is rejected before anything is spawned.
    pub fn new(capacity: u32, window: Duration) -> Result<Arc<Self>, LimiterError> {
        if window.is_zero() {
            return Err(LimiterError::ZeroWindow);
        }
        let handle = Handle::try_current().map_err(|_| LimiterError::NoRuntime)?;

        let limiter = Arc::new(Self { capacity, window, consumed: Mutex::new(0) });
        handle.spawn(reset_loop(Arc::downgrade(&limiter), window));
        Ok(limiter)
    }

    /// Takes a permit if the current window still has one. Never blocks on I/O.
    pub fn allow(&self) -> bool {
        let mut consumed = self.lock();
        if *consumed < self.capacity {
            *consumed += 1;
            trace!("Permit granted ({}/{})", *consumed, self.capacity);
            true
        } else {
            debug!("Permit denied, budget of {} exhausted", self.capacity);
            false
        }
    }

    /// Permits left in the current window.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(*self.lock())
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn reset(&self) {
        *self.lock() = 0;
    }

    // The counter is a plain integer, so a poisoned lock still holds a usable value.
    fn lock(&self) -> MutexGuard<'_, u32> {
        self.consumed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn reset_loop(limiter: Weak<GlobalLimiter>, window: Duration) {
    let mut ticker = interval_at(Instant::now() + window, window);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match limiter.upgrade() {
            Some(limiter) => {
                limiter.reset();
                trace!("Limiter window reset");
            }
            None => break,
        }
    }
}
