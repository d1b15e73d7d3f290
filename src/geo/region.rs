//! Coordinates and circular regions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::distance::distance;

/// A geographic position in degrees.
///
/// No range validation is performed: latitudes beyond ±90° or longitudes
/// beyond ±180° are carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A named circular geofence.
///
/// Regions are plain configuration: once handed to a
/// [`GeofenceMonitor`](super::GeofenceMonitor) they are shared read-only for
/// the monitor's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Stable identity, unique within a monitor
    pub id: String,
    /// Human-readable name used in alert text (falls back to `id`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub center: Coordinate,
    /// Radius in meters, must be greater than zero
    pub radius: f64,
}

impl Region {
    pub fn new(id: impl Into<String>, center: Coordinate, radius: f64) -> Self {
        Self {
            id: id.into(),
            label: None,
            center,
            radius,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label if one was configured, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Whether `position` lies strictly inside the fence.
    ///
    /// A position exactly on the boundary counts as outside.
    pub fn contains(&self, position: &Coordinate) -> bool {
        self.center.distance_to(position) < self.radius
    }
}
