//! Application-wide constants and defaults.

use crate::config::OutputFormat;

// # Configuration Paths

pub const CONFIG_DIR_NAME: &str = "geofencer";
pub const CONFIG_FILE_NAME: &str = "geofencer.toml";

// # Stream Defaults

/// Minimum movement in meters before a new sample is delivered
/// (mirrors a location watcher's distance interval).
pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;
pub const MINIMUM_MIN_DISTANCE: f64 = 0.0;
pub const MAXIMUM_MIN_DISTANCE: f64 = 10_000.0;

pub const DEFAULT_OUTPUT: OutputFormat = OutputFormat::Text;

/// Replay pacing when no multiplier is given (0 = fast-forward)
pub const DEFAULT_REPLAY_MULTIPLIER: f64 = 0.0;

// # Default Region
//
// Written to a freshly created config file so the monitor has something
// to watch on first run.

pub const DEFAULT_REGION_ID: &str = "home";
pub const DEFAULT_REGION_LABEL: &str = "Home";
pub const DEFAULT_REGION_LATITUDE: f64 = -1.894114;
pub const DEFAULT_REGION_LONGITUDE: f64 = 30.056424;
pub const DEFAULT_REGION_RADIUS: f64 = 10.0;

// # Exit Code

pub const EXIT_FAILURE: i32 = 1;
