//! Command-line command handlers for geofencer.
//!
//! One-shot commands live here. Monitoring itself (`run` and `replay`) is
//! driven by [`crate::Geofencer`].

pub mod check;
pub mod distance;
pub mod help;
