//! Minimum-movement filter.
//!
//! Location providers typically report a fresh fix every second even when
//! the device is standing still. The filter drops samples that moved less
//! than `min_distance` meters from the last delivered one, which keeps the
//! monitor's input close to what a watcher with a distance interval would
//! deliver.

use crate::geo::Coordinate;

#[derive(Debug, Clone)]
pub struct DistanceFilter {
    min_distance: f64,
    last: Option<Coordinate>,
}

impl DistanceFilter {
    /// A `min_distance` of 0 (or less) disables filtering.
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            last: None,
        }
    }

    /// Whether `coordinate` should be delivered. Accepted coordinates become
    /// the new reference point.
    ///
    /// Non-finite coordinates are always passed on, without becoming the
    /// reference, so that the monitor can report them.
    pub fn accept(&mut self, coordinate: &Coordinate) -> bool {
        if self.min_distance.is_nan() || self.min_distance <= 0.0 || !coordinate.is_finite() {
            return true;
        }

        match self.last {
            Some(last) if last.distance_to(coordinate) < self.min_distance => false,
            _ => {
                self.last = Some(*coordinate);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_always_accepted() {
        let mut filter = DistanceFilter::new(1_000.0);
        assert!(filter.accept(&Coordinate::new(10.0, 10.0)));
    }

    #[test]
    fn test_small_moves_are_dropped_until_threshold() {
        let mut filter = DistanceFilter::new(50.0);
        let start = Coordinate::new(0.0, 0.0);

        assert!(filter.accept(&start));
        // ~11 m and ~33 m from the start: both measured from the start point
        assert!(!filter.accept(&Coordinate::new(0.0001, 0.0)));
        assert!(!filter.accept(&Coordinate::new(0.0003, 0.0)));
        // ~56 m from the start
        assert!(filter.accept(&Coordinate::new(0.0005, 0.0)));
        // ~11 m from the new reference
        assert!(!filter.accept(&Coordinate::new(0.0006, 0.0)));
    }

    #[test]
    fn test_zero_threshold_accepts_everything() {
        let mut filter = DistanceFilter::new(0.0);
        let point = Coordinate::new(5.0, 5.0);

        assert!(filter.accept(&point));
        assert!(filter.accept(&point));
    }

    #[test]
    fn test_non_finite_passes_without_becoming_reference() {
        let mut filter = DistanceFilter::new(10.0);
        let start = Coordinate::new(0.0, 0.0);

        assert!(filter.accept(&start));
        assert!(filter.accept(&Coordinate::new(f64::NAN, 0.0)));
        // Still measured from the start point
        assert!(!filter.accept(&Coordinate::new(0.00001, 0.0)));
    }
}
