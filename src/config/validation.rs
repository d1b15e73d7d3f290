//! Configuration validation functionality.
//!
//! Rejects settings the stream cannot honor and region lists the monitor
//! would refuse, so that problems surface at startup with the config path
//! in the error chain.

use anyhow::{Context, Result};

use super::Config;
use crate::constants::*;
use crate::geo::validate_regions;

/// Validate a parsed configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(min_distance) = config.min_distance
        && !(MINIMUM_MIN_DISTANCE..=MAXIMUM_MIN_DISTANCE).contains(&min_distance)
    {
        anyhow::bail!(
            "min_distance ({} m) must be between {} and {} meters",
            min_distance,
            MINIMUM_MIN_DISTANCE,
            MAXIMUM_MIN_DISTANCE
        );
    }

    if config.regions.is_empty() {
        anyhow::bail!("At least one [[regions]] entry is required");
    }

    for region in &config.regions {
        if region.id.trim().is_empty() {
            anyhow::bail!("Region ids cannot be empty");
        }

        if !(-90.0..=90.0).contains(&region.latitude) {
            anyhow::bail!(
                "Region '{}': latitude must be between -90 and 90 degrees (got {})",
                region.id,
                region.latitude
            );
        }

        if !(-180.0..=180.0).contains(&region.longitude) {
            anyhow::bail!(
                "Region '{}': longitude must be between -180 and 180 degrees (got {})",
                region.id,
                region.longitude
            );
        }
    }

    validate_regions(&config.regions()).context("Invalid region configuration")?;

    Ok(())
}
