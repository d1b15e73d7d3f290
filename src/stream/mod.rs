//! Position stream: the producer side of the monitor.
//!
//! A [`PositionSource`] yields samples, and [`subscribe`] runs it on a reader
//! thread that forwards samples over a channel. The returned [`Subscription`]
//! is the start/stop handle: once [`Subscription::stop`] returns, the run
//! loop delivers no further samples to the monitor.
//!
//! ## Module Structure
//!
//! - [`parse`]: text and JSON sample line parsing
//! - [`source`]: line readers (stdin, files) and in-memory tracks
//! - [`filter`]: minimum-movement filter applied before delivery

pub mod filter;
pub mod parse;
pub mod source;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::geo::Coordinate;

pub use filter::DistanceFilter;
pub use parse::parse_sample_line;
pub use source::{PositionSource, ReaderSource, TrackSource};

/// A position reported by the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub coordinate: Coordinate,
    /// When the position was measured, if the source knows
    pub timestamp: Option<DateTime<Utc>>,
}

impl PositionSample {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: None,
        }
    }

    pub fn at(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            timestamp: Some(timestamp),
        }
    }
}

/// Messages delivered to the run loop.
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// A position ready for the monitor
    Sample(PositionSample),
    /// The source has no more samples
    Ended,
    /// Stop requested from outside the stream (signal)
    Shutdown,
}

/// Delivery settings for a subscription.
#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// See [`DistanceFilter`]. 0 delivers every sample.
    pub min_distance: f64,
    /// Sleep through the timestamp gaps between samples using the global
    /// time source (replay mode)
    pub pace: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            pace: false,
        }
    }
}

/// Start/stop handle for a running position stream.
pub struct Subscription {
    active: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    description: String,
}

impl Subscription {
    /// Whether samples should still be delivered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop delivery.
    ///
    /// The reader thread exits at its next sample; anything it already
    /// queued is discarded by the run loop, which checks
    /// [`Subscription::is_active`] before each delivery.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Human-readable name of the source.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stop and wait for the reader thread to exit.
    ///
    /// Only call this once the source is known to be finished (after
    /// [`StreamMessage::Ended`]); a reader blocked on stdin never returns.
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The reader may be blocked on input, so it is detached rather than joined
        self.stop();
    }
}

/// How a sample's timestamp relates to the newest one seen so far.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    First,
    Forward(std::time::Duration),
    Backward { latest: DateTime<Utc> },
}

/// Newest timestamp seen on a stream.
///
/// Only moves forward, so a late sample does not make the next gap cover
/// time that was already paced through.
#[derive(Debug, Default)]
struct TrackClock {
    latest: Option<DateTime<Utc>>,
}

impl TrackClock {
    fn advance(&mut self, timestamp: DateTime<Utc>) -> Step {
        let Some(latest) = self.latest else {
            self.latest = Some(timestamp);
            return Step::First;
        };

        if timestamp < latest {
            return Step::Backward { latest };
        }

        self.latest = Some(timestamp);
        Step::Forward((timestamp - latest).to_std().unwrap_or_default())
    }
}

/// Start streaming `source` into `sender` on a background thread.
pub fn subscribe<S: PositionSource>(
    mut source: S,
    options: StreamOptions,
    sender: Sender<StreamMessage>,
) -> Subscription {
    let active = Arc::new(AtomicBool::new(true));
    let description = source.describe();
    let thread_active = Arc::clone(&active);

    let handle = thread::spawn(move || {
        let mut filter = DistanceFilter::new(options.min_distance);
        let mut clock = TrackClock::default();

        while thread_active.load(Ordering::SeqCst) {
            let sample = match source.next_sample() {
                None => {
                    let _ = sender.send(StreamMessage::Ended);
                    break;
                }
                Some(Err(e)) => {
                    log_warning!("Skipping sample: {e:#}");
                    continue;
                }
                Some(Ok(sample)) => sample,
            };

            if let Some(timestamp) = sample.timestamp {
                match clock.advance(timestamp) {
                    Step::Backward { latest } => log_warning!(
                        "Sample at {} is older than the previous sample at {}",
                        timestamp.to_rfc3339(),
                        latest.to_rfc3339()
                    ),
                    Step::Forward(gap) if options.pace => crate::time_source::sleep(gap),
                    _ => {}
                }
            }

            if !filter.accept(&sample.coordinate) {
                continue;
            }

            if !thread_active.load(Ordering::SeqCst)
                || sender.send(StreamMessage::Sample(sample)).is_err()
            {
                break;
            }
        }
    });

    Subscription {
        active,
        handle: Some(handle),
        description,
    }
}
