//! Configuration check command.
//!
//! Loads and validates the configuration the same way `run` does, then
//! reports the regions and any that overlap. Overlap is legal (a position
//! can be inside several regions at once) but is usually worth knowing.

use anyhow::Result;

use crate::config::Config;
use crate::geo::{GeofenceMonitor, Region};
use crate::utils::format_distance;

/// A pair of regions whose circles intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap<'a> {
    pub first: &'a Region,
    pub second: &'a Region,
    /// Distance between the two centers in meters
    pub separation: f64,
}

/// Find every pair of regions whose circles intersect, in declaration order.
pub fn find_overlaps(regions: &[Region]) -> Vec<Overlap<'_>> {
    let mut overlaps = Vec::new();
    for (i, first) in regions.iter().enumerate() {
        for second in &regions[i + 1..] {
            let separation = first.center.distance_to(&second.center);
            if separation < first.radius + second.radius {
                overlaps.push(Overlap {
                    first,
                    second,
                    separation,
                });
            }
        }
    }
    overlaps
}

/// Validate the configuration and describe the regions it defines.
pub fn run_check_command(debug_enabled: bool) -> Result<()> {
    log_version!();

    let config = Config::load()?;
    config.log_config();

    // Same construction path as the run loop
    let monitor = GeofenceMonitor::new(config.regions())?;

    let overlaps = find_overlaps(monitor.regions());
    if overlaps.is_empty() {
        log_block_start!("No overlapping regions");
    } else {
        log_block_start!("Overlapping regions:");
        for overlap in &overlaps {
            log_indented!(
                "{} and {} ({} apart)",
                overlap.first.display_name(),
                overlap.second.display_name(),
                format_distance(overlap.separation)
            );
        }
    }

    if debug_enabled {
        log_pipe!();
        log_debug!("Center distances:");
        let regions = monitor.regions();
        for (i, first) in regions.iter().enumerate() {
            for second in &regions[i + 1..] {
                log_indented!(
                    "{} -> {}: {}",
                    first.id,
                    second.id,
                    format_distance(first.center.distance_to(&second.center))
                );
            }
        }
    }

    log_block_start!("Configuration is valid");
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("check - Validate configuration and list regions");
    log_block_start!("Usage: geofencer check [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>  Check the configuration in another directory");
    log_indented!("-d, --debug         Also print the distance between every pair of centers");
    log_block_start!("Creates the default configuration if none exists yet.");
    log_end!();
}
