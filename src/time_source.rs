//! Time source abstraction for supporting both real-time and replayed time.
//!
//! Transition events are stamped with the time of the sample that caused
//! them. Samples that carry no timestamp of their own are stamped from the
//! global time source instead, which is the system clock during normal
//! operation and the track clock while replaying a recorded track.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: StdDuration);

    /// Check if this is a replayed time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Clock that follows a recorded track.
///
/// Time starts at the track's first timestamp and only moves when the
/// replaying source sleeps across the gap to the next sample.
/// - `multiplier > 0`: real sleeps are scaled down by the multiplier
///   (e.g. 60.0 = one track minute per real second)
/// - `multiplier == 0`: fast-forward, no real sleeping at all
pub struct ReplayTimeSource {
    multiplier: f64,
    current: Mutex<DateTime<Utc>>,
}

impl ReplayTimeSource {
    /// Create a replay clock starting at `start`.
    ///
    /// Negative or non-finite multipliers fall back to fast-forward.
    pub fn new(start: DateTime<Utc>, multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            0.0
        };

        Self {
            multiplier,
            current: Mutex::new(start),
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_fast_forward(&self) -> bool {
        self.multiplier == 0.0
    }
}

impl TimeSource for ReplayTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn sleep(&self, duration: StdDuration) {
        if !self.is_fast_forward() {
            let real = duration.as_secs_f64() / self.multiplier;
            if real > 0.0 {
                std::thread::sleep(StdDuration::from_secs_f64(real));
            }
        }

        let step = ChronoDuration::from_std(duration).unwrap_or_else(|_| ChronoDuration::zero());
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = current.checked_add_signed(step).unwrap_or(*current);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Utc> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: StdDuration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}

/// Check if we're replaying a recorded track
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}
