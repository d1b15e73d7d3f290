//! Position sources.

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::PositionSample;
use super::parse::parse_sample_line;
use crate::utils::private_path;

/// Something that produces position samples one at a time.
///
/// `None` ends the stream. An `Err` is a single bad sample: the stream logs
/// it and keeps reading.
pub trait PositionSource: Send + 'static {
    fn next_sample(&mut self) -> Option<Result<PositionSample>>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// Reads one sample per line from any buffered reader.
pub struct ReaderSource {
    reader: Box<dyn BufRead + Send>,
    name: String,
    line_number: usize,
}

impl ReaderSource {
    pub fn new(reader: Box<dyn BufRead + Send>, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            line_number: 0,
        }
    }

    /// Read samples from standard input.
    pub fn stdin() -> Self {
        Self::new(Box::new(BufReader::new(std::io::stdin())), "stdin")
    }

    /// Read samples from a file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open track file {}", private_path(path)))?;
        Ok(Self::new(
            Box::new(BufReader::new(file)),
            private_path(path),
        ))
    }
}

impl PositionSource for ReaderSource {
    fn next_sample(&mut self) -> Option<Result<PositionSample>> {
        let mut line = String::new();

        loop {
            line.clear();
            self.line_number += 1;

            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(
                        Err(e).with_context(|| format!("{}:{}", self.name, self.line_number)),
                    );
                }
            }

            match parse_sample_line(&line) {
                Ok(Some(sample)) => return Some(Ok(sample)),
                Ok(None) => continue,
                Err(e) => {
                    return Some(Err(e.context(format!("{}:{}", self.name, self.line_number))));
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// An in-memory track, used for replays and tests.
pub struct TrackSource {
    samples: VecDeque<PositionSample>,
    total: usize,
}

impl TrackSource {
    pub fn new(samples: Vec<PositionSample>) -> Self {
        let total = samples.len();
        Self {
            samples: samples.into(),
            total,
        }
    }

    /// Load a whole track file up front.
    ///
    /// Malformed lines are logged and skipped here, so the returned track
    /// only contains parseable samples.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderSource::open(path)?;
        let mut samples = Vec::new();

        while let Some(sample) = reader.next_sample() {
            match sample {
                Ok(sample) => samples.push(sample),
                Err(e) => log_warning!("Skipping sample: {e:#}"),
            }
        }

        Ok(Self::new(samples))
    }

    /// Remaining samples.
    pub fn samples(&self) -> impl Iterator<Item = &PositionSample> {
        self.samples.iter()
    }
}

impl PositionSource for TrackSource {
    fn next_sample(&mut self) -> Option<Result<PositionSample>> {
        self.samples.pop_front().map(Ok)
    }

    fn describe(&self) -> String {
        format!("track ({} samples)", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use std::io::Cursor;

    fn reader(text: &str) -> ReaderSource {
        ReaderSource::new(Box::new(Cursor::new(text.to_string())), "test")
    }

    #[test]
    fn test_reader_skips_comments_and_reports_bad_lines() {
        let mut source = reader("# header\n1.0,2.0\n\nnot a sample\n3.0,4.0\n");

        let first = source.next_sample().unwrap().unwrap();
        assert_eq!(first.coordinate, Coordinate::new(1.0, 2.0));

        let bad = source.next_sample().unwrap().unwrap_err();
        assert!(format!("{bad:#}").starts_with("test:4"));

        let second = source.next_sample().unwrap().unwrap();
        assert_eq!(second.coordinate, Coordinate::new(3.0, 4.0));

        assert!(source.next_sample().is_none());
    }

    #[test]
    fn test_track_load_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.csv");
        std::fs::write(&path, "1.0,2.0\ngarbage\n1.5,2.5,2024-05-01T08:00:00Z\n").unwrap();

        let track = TrackSource::load(&path).unwrap();
        let coordinates: Vec<_> = track.samples().map(|s| s.coordinate).collect();

        assert_eq!(
            coordinates,
            vec![Coordinate::new(1.0, 2.0), Coordinate::new(1.5, 2.5)]
        );
        assert_eq!(track.describe(), "track (2 samples)");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ReaderSource::open(&dir.path().join("missing.csv")).is_err());
    }
}
