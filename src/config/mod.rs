//! Configuration system for geofencer.
//!
//! Regions and stream settings are read from a TOML file, validated, and
//! handed to the monitor as plain [`Region`] values.
//!
//! ## Configuration Source
//!
//! The file is searched at:
//! 1. `<DIR>/geofencer.toml` when a directory was given with `--config <DIR>`
//! 2. **XDG_CONFIG_HOME**/geofencer/geofencer.toml otherwise
//!
//! A commented default file is created on first run.
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Stream]
//! min_distance = 1.0  # Minimum movement in meters between delivered samples (0 = deliver all)
//! output = "text"     # Alert output: "text" or "json"
//!
//! #[Regions]
//! [[regions]]
//! id = "home"         # Unique region id
//! label = "Home"      # Name used in alerts (optional)
//! latitude = -1.894114
//! longitude = 30.056424
//! radius = 10.0       # Radius in meters (> 0)
//! ```
//!
//! ## Validation
//!
//! - `min_distance` within 0-10000 meters
//! - at least one region, each with a non-empty id
//! - region centers within ±90° latitude and ±180° longitude
//! - unique ids and strictly positive radii (the same checks the monitor runs)

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::geo::{Coordinate, Region};
use crate::utils::format_distance;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// How transition alerts are written.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable alert lines through the logger
    Text,
    /// One JSON object per event on stdout
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// A `[[regions]]` entry.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RegionConfig {
    pub id: String,
    pub label: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters
    pub radius: f64,
}

impl RegionConfig {
    pub fn to_region(&self) -> Region {
        Region {
            id: self.id.clone(),
            label: self.label.clone(),
            center: Coordinate::new(self.latitude, self.longitude),
            radius: self.radius,
        }
    }
}

/// Configuration structure for geofencer settings.
///
/// Scalar settings are optional and fall back to the defaults in
/// `constants`; the region list is required.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Samples closer than this many meters to the last delivered sample
    /// are dropped by the stream. 0 delivers everything.
    pub min_distance: Option<f64>,
    /// Alert output format.
    pub output: Option<OutputFormat>,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        loading::load_from_path(path)
    }

    /// Get the configuration file path.
    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    /// Regions in declaration order.
    pub fn regions(&self) -> Vec<Region> {
        self.regions.iter().map(RegionConfig::to_region).collect()
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance.unwrap_or(DEFAULT_MIN_DISTANCE)
    }

    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or(DEFAULT_OUTPUT)
    }

    /// Log the resolved configuration.
    pub fn log_config(&self) {
        match Self::get_config_path() {
            Ok(path) => log_block_start!(
                "Loaded configuration from {}",
                crate::utils::private_path(&path)
            ),
            Err(_) => log_block_start!("Loaded configuration"),
        }

        let min_distance = self.min_distance();
        if min_distance > 0.0 {
            log_indented!("Minimum movement: {}", format_distance(min_distance));
        } else {
            log_indented!("Minimum movement: off (every sample delivered)");
        }
        log_indented!("Output: {}", self.output().as_str());

        let count = self.regions.len();
        log_block_start!(
            "Watching {} region{}",
            count,
            if count == 1 { "" } else { "s" }
        );

        let id_width = self.regions.iter().map(|r| r.id.len()).max().unwrap_or(0);
        for region in self.regions() {
            log_indented!(
                "{:<id_width$}  {}  r={}",
                region.id,
                region.center,
                format_distance(region.radius)
            );
        }
    }
}

#[cfg(test)]
mod tests;
