//! Transition events emitted by the monitor.
//!
//! Events are ephemeral: the monitor hands them to the caller and keeps no
//! copy. They serialize to a flat JSON object so that alert sinks can emit
//! one event per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::region::{Coordinate, Region};

/// Direction of a boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Outside → Inside
    Entered,
    /// Inside → Outside
    Exited,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Entered => "entered",
            TransitionKind::Exited => "exited",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single region membership change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Id of the region whose membership changed
    pub region_id: String,
    /// Configured label of the region, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_label: Option<String>,
    pub kind: TransitionKind,
    /// The sample that triggered the change
    pub position: Coordinate,
    /// Distance from the sample to the region center in meters
    pub distance: f64,
    pub timestamp: DateTime<Utc>,
}

impl TransitionEvent {
    pub(crate) fn new(
        region: &Region,
        kind: TransitionKind,
        position: Coordinate,
        distance: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            region_id: region.id.clone(),
            region_label: region.label.clone(),
            kind,
            position,
            distance,
            timestamp,
        }
    }

    /// Label if present, otherwise the region id.
    pub fn region_name(&self) -> &str {
        self.region_label.as_deref().unwrap_or(&self.region_id)
    }
}
