use anyhow::{Context, Result};
use std::io::Write;

use super::EventSink;
use crate::geo::TransitionEvent;

/// Writes each event as a single JSON line and flushes immediately so that
/// downstream consumers see alerts as they happen.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonSink<W> {
    fn handle(&mut self, event: &TransitionEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event).context("Failed to serialize event")?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .context("Failed to write event")?;
        Ok(())
    }
}
