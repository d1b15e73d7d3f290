use anyhow::Result;

use super::EventSink;
use crate::geo::{TransitionEvent, TransitionKind};
use crate::utils::format_distance;

/// Writes alerts as `[INFO]` log lines.
#[derive(Debug, Default)]
pub struct TextSink;

impl TextSink {
    pub fn new() -> Self {
        Self
    }
}

/// Alert sentence for an event, e.g. "You have entered the Home area."
pub fn alert_message(event: &TransitionEvent) -> String {
    format!("You have {} the {} area.", event.kind, event.region_name())
}

impl EventSink for TextSink {
    fn handle(&mut self, event: &TransitionEvent) -> Result<()> {
        match event.kind {
            TransitionKind::Entered => log_info!("Geofence alert: {}", alert_message(event)),
            TransitionKind::Exited => log_warning!("Geofence alert: {}", alert_message(event)),
        }
        log_indented!(
            "Position {} is {} from the center",
            event.position,
            format_distance(event.distance)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Coordinate, GeofenceMonitor, Region};

    #[test]
    fn test_alert_message_uses_label() {
        let region = Region::new("home", Coordinate::new(0.0, 0.0), 10.0).with_label("Home");
        let mut monitor = GeofenceMonitor::new(vec![region]).unwrap();

        let entered = monitor.process_sample(Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(alert_message(&entered[0]), "You have entered the Home area.");

        let exited = monitor.process_sample(Coordinate::new(1.0, 0.0)).unwrap();
        assert_eq!(alert_message(&exited[0]), "You have exited the Home area.");
    }
}
