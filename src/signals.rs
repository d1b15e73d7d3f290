//! Signal handling for the run loop.
//!
//! Termination signals are turned into [`StreamMessage::Shutdown`] on the
//! same channel that carries position samples, so the run loop has a
//! single place to wait on and stops the subscription from its own thread.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::sync::mpsc::Sender;
use std::thread;

use crate::stream::StreamMessage;

/// Register SIGINT, SIGTERM and SIGHUP and forward them as shutdown messages.
pub fn setup_signal_handler(sender: Sender<StreamMessage>, debug_enabled: bool) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    thread::spawn(move || {
        for sig in signals.forever() {
            if debug_enabled {
                log_pipe!();
                log_debug!("Received {}, stopping position stream", signal_name(sig));
            }

            // The run loop is gone once the receiver is dropped
            if sender.send(StreamMessage::Shutdown).is_err() {
                break;
            }
        }
    });

    Ok(())
}

fn signal_name(sig: i32) -> &'static str {
    match sig {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        _ => "signal",
    }
}
