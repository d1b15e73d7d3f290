//! Application coordinator that manages the monitoring lifecycle.
//!
//! This module wires the collaborators around the monitor:
//! - Configuration loading and region setup
//! - Signal handler setup
//! - Position stream subscription (stdin, file, or replayed track)
//! - The run loop feeding samples to the monitor and events to the sinks
//! - Shutdown and the final summary
//!
//! The `Geofencer` struct uses a builder pattern for the different inputs:
//! - Live stdin: `Geofencer::new(debug_enabled).run()`
//! - File input: `Geofencer::new(debug_enabled).with_input_file(path).run()`
//! - Replay: `Geofencer::new(debug_enabled).replay(path, multiplier).run()`

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};

use crate::alerts::{EventSink, dispatch, sink_for};
use crate::config::{Config, OutputFormat};
use crate::geo::GeofenceMonitor;
use crate::logger::Log;
use crate::signals::setup_signal_handler;
use crate::stream::{
    ReaderSource, StreamMessage, StreamOptions, Subscription, TrackSource, subscribe,
};
use crate::time_source::{self, ReplayTimeSource};
use crate::utils::private_path;

/// Where position samples come from.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Stdin,
    File(PathBuf),
    Replay { path: PathBuf, multiplier: f64 },
}

/// Counters reported when the stream stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Samples accepted by the monitor
    pub samples: u64,
    /// Samples rejected as non-finite
    pub rejected: u64,
    /// Transition events dispatched
    pub events: u64,
    /// Regions inside when the stream stopped, in declaration order
    pub inside: Vec<String>,
}

/// Builder for configuring and running the geofence monitor.
///
/// # Examples
///
/// ```no_run
/// use geofencer::Geofencer;
///
/// # fn main() -> anyhow::Result<()> {
/// // Monitor positions piped on stdin
/// Geofencer::new(false).run()?;
///
/// // Replay a recorded walk at 60x speed
/// Geofencer::new(true)
///     .replay("walk.csv".into(), 60.0)
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct Geofencer {
    debug_enabled: bool,
    input: Input,
    output: Option<OutputFormat>,
}

impl Geofencer {
    /// Create a runner reading from stdin with the configured output
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            input: Input::Stdin,
            output: None,
        }
    }

    /// Read samples from a file instead of stdin
    pub fn with_input_file(mut self, path: PathBuf) -> Self {
        self.input = Input::File(path);
        self
    }

    /// Replay a timestamped track, pacing samples by their timestamps
    pub fn replay(mut self, path: PathBuf, multiplier: f64) -> Self {
        self.input = Input::Replay { path, multiplier };
        self
    }

    /// Override the configured output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }

    /// Execute the monitor until the stream ends or a signal arrives.
    pub fn run(self) -> Result<RunSummary> {
        let config = Config::load()?;
        let output = self.output.unwrap_or_else(|| config.output());

        // JSON events own stdout; log lines would corrupt the stream
        if output == OutputFormat::Json && !Log::is_file_logging() {
            Log::set_enabled(false);
        }

        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled - logging every sample");
        }

        config.log_config();

        let mut monitor =
            GeofenceMonitor::new(config.regions()).context("Failed to start geofence monitor")?;

        let (sender, receiver) = channel();
        setup_signal_handler(sender.clone(), self.debug_enabled)?;

        let mut options = StreamOptions {
            min_distance: config.min_distance(),
            pace: false,
        };

        let subscription = match &self.input {
            Input::Stdin => subscribe(ReaderSource::stdin(), options, sender),
            Input::File(path) => subscribe(ReaderSource::open(path)?, options, sender),
            Input::Replay { path, multiplier } => {
                let track = TrackSource::load(path)?;
                let start = track
                    .samples()
                    .find_map(|sample| sample.timestamp)
                    .unwrap_or_else(Utc::now);

                time_source::init_time_source(Arc::new(ReplayTimeSource::new(start, *multiplier)));
                options.pace = true;

                log_block_start!("Replaying {}", private_path(path));
                if *multiplier > 0.0 {
                    log_indented!("Speed: {multiplier}x");
                } else {
                    log_indented!("Speed: instant");
                }

                subscribe(track, options, sender)
            }
        };

        log_block_start!("Monitoring positions from {}", subscription.description());

        let mut sinks = vec![sink_for(output)];
        let summary = run_loop(
            &mut monitor,
            subscription,
            &receiver,
            &mut sinks,
            self.debug_enabled,
        )?;

        log_summary(&summary);
        log_end!();

        Ok(summary)
    }
}

/// Feed stream messages to the monitor until the stream ends or stops.
///
/// Samples that arrive after the subscription was stopped are dropped, so a
/// stop is final even with messages still queued.
pub(crate) fn run_loop(
    monitor: &mut GeofenceMonitor,
    subscription: Subscription,
    receiver: &Receiver<StreamMessage>,
    sinks: &mut [Box<dyn EventSink>],
    debug_enabled: bool,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut ended = false;

    for message in receiver.iter() {
        match message {
            StreamMessage::Sample(sample) => {
                if !subscription.is_active() {
                    break;
                }

                let result = match sample.timestamp {
                    Some(timestamp) => monitor.process_sample_at(sample.coordinate, timestamp),
                    None => monitor.process_sample(sample.coordinate),
                };

                match result {
                    Ok(events) => {
                        if debug_enabled {
                            log_debug!(
                                "Sample {} -> {} event(s)",
                                sample.coordinate,
                                events.len()
                            );
                        }
                        summary.events += events.len() as u64;
                        dispatch(sinks, &events).context("Failed to deliver alert")?;
                    }
                    Err(e) => {
                        summary.rejected += 1;
                        log_warning!("Rejected sample: {e}");
                    }
                }
            }
            StreamMessage::Ended => {
                log_block_start!("Position stream ended");
                ended = true;
                break;
            }
            StreamMessage::Shutdown => {
                subscription.stop();
                log_block_start!("Stopping position stream");
                break;
            }
        }
    }

    if ended {
        subscription.join();
    } else {
        subscription.stop();
    }

    summary.samples = monitor.samples_processed();
    summary.inside = monitor
        .inside_regions()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    log_decorated!(
        "Processed {} sample(s), {} transition(s)",
        summary.samples,
        summary.events
    );
    if summary.rejected > 0 {
        log_indented!("Rejected {} non-finite sample(s)", summary.rejected);
    }
    if summary.inside.is_empty() {
        log_indented!("Currently outside all regions");
    } else {
        log_indented!("Currently inside: {}", summary.inside.join(", "));
    }
}
