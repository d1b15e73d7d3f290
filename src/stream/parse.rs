//! Position sample line parsing.
//!
//! Accepted line forms:
//!
//! ```text
//! -1.8938,30.0565
//! -1.8938, 30.0565, 2024-05-01T08:00:00Z
//! {"latitude": -1.8938, "longitude": 30.0565, "timestamp": "2024-05-01T08:00:00Z"}
//! # comments and blank lines are skipped
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::PositionSample;
use crate::geo::Coordinate;

#[derive(Debug, Deserialize)]
struct JsonSample {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank and comment lines. Non-finite numbers such
/// as `NaN` parse successfully; rejecting them is the monitor's job.
pub fn parse_sample_line(line: &str) -> Result<Option<PositionSample>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        let sample: JsonSample =
            serde_json::from_str(line).context("Invalid JSON position sample")?;
        return Ok(Some(PositionSample {
            coordinate: Coordinate::new(sample.latitude, sample.longitude),
            timestamp: sample.timestamp,
        }));
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(2..=3).contains(&fields.len()) {
        anyhow::bail!(
            "Expected 'latitude,longitude[,timestamp]' but found {} fields",
            fields.len()
        );
    }

    let latitude: f64 = fields[0]
        .parse()
        .with_context(|| format!("Invalid latitude '{}'", fields[0]))?;
    let longitude: f64 = fields[1]
        .parse()
        .with_context(|| format!("Invalid longitude '{}'", fields[1]))?;

    let timestamp = match fields.get(2) {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid RFC 3339 timestamp '{raw}'"))?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    Ok(Some(PositionSample {
        coordinate: Coordinate::new(latitude, longitude),
        timestamp,
    }))
}
