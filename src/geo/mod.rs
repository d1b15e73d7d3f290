//! Geofence monitoring engine.
//!
//! This module is the heart of geofencer: it decides, for every incoming
//! position, which configured regions the device has just entered or left.
//!
//! ## Module Structure
//!
//! - [`distance`]: Haversine great-circle distance between two coordinates
//! - [`region`]: Coordinates and circular regions (geofences)
//! - [`event`]: Transition events produced when membership changes
//! - [`monitor`]: The stateful monitor owning per-region membership
//!
//! ## Key Behavior
//!
//! - **Edge-triggered alerts**: exactly one `Entered` and one `Exited` event per
//!   region per crossing; samples that stay on the same side emit nothing
//! - **Initial membership is outside**: every region starts `Outside`, so the
//!   very first sample can only produce `Entered` events
//! - **Strict boundary**: a position exactly `radius` meters from the center
//!   is outside
//! - **Deterministic ordering**: events come back in region declaration order

pub mod distance;
pub mod event;
pub mod monitor;
pub mod region;

pub use distance::{EARTH_RADIUS_METERS, distance};
pub use event::{TransitionEvent, TransitionKind};
pub use monitor::{GeofenceError, GeofenceMonitor, RegionState, validate_regions};
pub use region::{Coordinate, Region};
