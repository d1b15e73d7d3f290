//! Great-circle distance between two coordinates.

use crate::geo::{Coordinate, distance};
use crate::utils::format_distance;

/// Print the distance between `from` and `to`.
///
/// Returns the distance in meters.
pub fn run_distance_command(from: Coordinate, to: Coordinate) -> f64 {
    let meters = distance(from, to);

    log_version!();
    log_block_start!("From: {}", from);
    log_indented!("To:   {}", to);
    log_block_start!("Distance: {:.3} m ({})", meters, format_distance(meters));
    log_end!();

    meters
}

pub fn display_help() {
    log_version!();
    log_block_start!("distance - Great-circle distance between two points");
    log_block_start!("Usage: geofencer distance <LAT1> <LON1> <LAT2> <LON2>");
    log_block_start!("Arguments:");
    log_indented!("LAT1 LON1  First point in decimal degrees");
    log_indented!("LAT2 LON2  Second point in decimal degrees");
    log_block_start!("Uses the haversine formula on a sphere of radius 6,371,000 m.");
    log_block_start!("Examples:");
    log_indented!("geofencer distance 0 0 0 1");
    log_indented!("geofencer distance -1.894114 30.056424 -1.9536 30.0605");
    log_end!();
}
