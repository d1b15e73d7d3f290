//! # Geofencer Library
//!
//! Circular geofence monitoring: a great-circle distance calculator and a
//! monitor that turns a stream of position samples into entered/exited
//! events, plus the host pieces the `geofencer` binary is built from.
//!
//! ## Architecture
//!
//! - **Engine**: `geo` module with the distance calculator, regions, events
//!   and the `GeofenceMonitor` state machine
//! - **Entry Point**: `Geofencer` struct runs the monitor over a position stream
//! - **Configuration**: `config` module for TOML-based region settings
//! - **Stream**: `stream` module with sample parsing, sources and the
//!   start/stop subscription handle
//! - **Alerts**: `alerts` module with text and JSON event sinks
//! - **Commands**: `commands` module for one-shot CLI subcommands
//! - **Infrastructure**: Signal handling, replay clock, logging, and utilities

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod alerts;
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod geo;
pub mod signals;
pub mod stream;
pub mod time_source;
pub mod utils;

mod geofencer;

pub use geo::{
    Coordinate, GeofenceError, GeofenceMonitor, Region, TransitionEvent, TransitionKind, distance,
};
pub use geofencer::{Geofencer, RunSummary};
