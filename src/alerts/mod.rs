//! Alert sinks: the consumer side of the monitor.
//!
//! Every transition event returned by the monitor is handed to each
//! configured [`EventSink`] in order.
//!
//! - [`TextSink`]: human-readable alert lines through the logger
//! - [`JsonSink`]: one JSON object per event on any writer (stdout by default)

mod json;
mod text;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::geo::TransitionEvent;

pub use json::JsonSink;
pub use text::TextSink;

/// Receives transition events.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink {
    fn handle(&mut self, event: &TransitionEvent) -> Result<()>;
}

/// Build the sink for an output format.
pub fn sink_for(output: OutputFormat) -> Box<dyn EventSink> {
    match output {
        OutputFormat::Text => Box::new(TextSink::new()),
        OutputFormat::Json => Box::new(JsonSink::stdout()),
    }
}

/// Hand each event to each sink, stopping at the first sink error.
pub fn dispatch(sinks: &mut [Box<dyn EventSink>], events: &[TransitionEvent]) -> Result<()> {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.handle(event)?;
        }
    }
    Ok(())
}
