//! Stateful geofence monitor.
//!
//! The monitor owns the membership state of every configured region and is
//! the only place that state is ever mutated. Each call to
//! [`GeofenceMonitor::process_sample`] evaluates one position against all
//! regions in declaration order and reports the regions whose membership
//! flipped.
//!
//! ## State Machine
//!
//! Each region runs an independent two-state machine:
//!
//! ```text
//!            distance < radius
//!   Outside ───────────────────▶ Inside
//!      ▲                            │
//!      └────────────────────────────┘
//!            distance >= radius
//! ```
//!
//! Every region starts `Outside`. There is no terminal state.
//!
//! ## Threading
//!
//! Processing takes `&mut self`, so concurrent callers must serialize access
//! themselves (a single writer). The monitor performs no I/O and never blocks.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use super::event::{TransitionEvent, TransitionKind};
use super::region::{Coordinate, Region};

/// Errors reported by the geofence engine.
///
/// Construction errors mean the monitor was never created. The only
/// per-sample error is a non-finite position, which leaves state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeofenceError {
    #[error("duplicate region id '{0}'")]
    DuplicateRegion(String),

    #[error("region '{id}' has invalid radius {radius} (must be greater than 0 meters)")]
    InvalidRadius { id: String, radius: f64 },

    #[error("region '{id}' has a non-finite center ({latitude}, {longitude})")]
    InvalidCenter {
        id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("non-finite position ({latitude}, {longitude})")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
}

/// Membership of a single region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionState {
    #[default]
    Outside,
    Inside,
}

impl RegionState {
    fn from_inside(inside: bool) -> Self {
        if inside {
            RegionState::Inside
        } else {
            RegionState::Outside
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, RegionState::Inside)
    }
}

/// Validate a region list without building a monitor.
///
/// Used by configuration validation so that `geofencer check` reports the
/// same errors the monitor would.
pub fn validate_regions(regions: &[Region]) -> Result<(), GeofenceError> {
    let mut seen = HashSet::with_capacity(regions.len());

    for region in regions {
        if !seen.insert(region.id.as_str()) {
            return Err(GeofenceError::DuplicateRegion(region.id.clone()));
        }

        if region.radius.is_nan() || region.radius <= 0.0 {
            return Err(GeofenceError::InvalidRadius {
                id: region.id.clone(),
                radius: region.radius,
            });
        }

        if !region.center.is_finite() {
            return Err(GeofenceError::InvalidCenter {
                id: region.id.clone(),
                latitude: region.center.latitude,
                longitude: region.center.longitude,
            });
        }
    }

    Ok(())
}

/// Tracks which regions a moving position is inside of.
#[derive(Debug, Clone)]
pub struct GeofenceMonitor {
    regions: Arc<[Region]>,
    /// Indexed like `regions`
    membership: Vec<RegionState>,
    samples_processed: u64,
}

impl GeofenceMonitor {
    /// Build a monitor over `regions`.
    ///
    /// Fails on duplicate ids, a radius that is not strictly positive, or a
    /// non-finite center. All regions start [`RegionState::Outside`].
    pub fn new(regions: impl Into<Arc<[Region]>>) -> Result<Self, GeofenceError> {
        let regions = regions.into();
        validate_regions(&regions)?;

        let membership = vec![RegionState::Outside; regions.len()];

        Ok(Self {
            regions,
            membership,
            samples_processed: 0,
        })
    }

    /// Evaluate one position, stamping events with the current time source.
    pub fn process_sample(
        &mut self,
        position: Coordinate,
    ) -> Result<Vec<TransitionEvent>, GeofenceError> {
        self.process_sample_at(position, crate::time_source::now())
    }

    /// Evaluate one position, stamping events with `timestamp`.
    ///
    /// Returns the membership changes in region declaration order. A
    /// non-finite position is rejected before any state is touched.
    pub fn process_sample_at(
        &mut self,
        position: Coordinate,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<TransitionEvent>, GeofenceError> {
        if !position.is_finite() {
            return Err(GeofenceError::NonFiniteCoordinate {
                latitude: position.latitude,
                longitude: position.longitude,
            });
        }

        let mut events = Vec::new();

        for (region, state) in self.regions.iter().zip(self.membership.iter_mut()) {
            let distance = position.distance_to(&region.center);
            let next = RegionState::from_inside(distance < region.radius);

            let kind = match (*state, next) {
                (RegionState::Outside, RegionState::Inside) => TransitionKind::Entered,
                (RegionState::Inside, RegionState::Outside) => TransitionKind::Exited,
                _ => continue,
            };

            *state = next;
            events.push(TransitionEvent::new(
                region, kind, position, distance, timestamp,
            ));
        }

        self.samples_processed += 1;
        Ok(events)
    }

    /// Configured regions in declaration order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Current membership of the region with `id`, or `None` if unknown.
    pub fn is_inside(&self, id: &str) -> Option<bool> {
        self.regions
            .iter()
            .position(|region| region.id == id)
            .map(|index| self.membership[index].is_inside())
    }

    /// Ids of the regions currently inside, in declaration order.
    pub fn inside_regions(&self) -> Vec<&str> {
        self.regions
            .iter()
            .zip(&self.membership)
            .filter(|(_, state)| state.is_inside())
            .map(|(region, _)| region.id.as_str())
            .collect()
    }

    /// Number of accepted samples so far.
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }
}
