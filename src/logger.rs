//! Structured logging system with visual formatting.
//!
//! All geofencer output, including alerts in text mode, is written through
//! this module so that it shares one box-drawing layout:
//!
//! ```text
//! ┏ geofencer v0.1.0 ━━╸
//! ┃
//! ┣ Loaded configuration from ~/.config/geofencer/geofencer.toml
//! ┃   Minimum movement: 1.0 m
//! ┃   Output: text
//! ┃
//! ┣ Watching 1 region
//! ┃   home  (-1.894114, 30.056424)  r=10.0 m
//! ┃
//! ┣ Monitoring positions from stdin
//! ┣[INFO] Geofence alert: You have entered the Home area.
//! ┃   Position (-1.894114, 30.056424) is 0.0 m from the center
//! ```
//!
//! The logger can be disabled at runtime for quiet operation (JSON output,
//! tests) and can be redirected to a file with [`Log::start_file_logging`].

use anyhow::Context;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

// Channel for routing output to file when --log is active
static LOG_CHANNEL: OnceLock<Option<Sender<LogMessage>>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Semantic level shown in `[LEVEL]` brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warning,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Level::Info | Level::Debug => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn tag(self) -> String {
        format!("[{}{}\x1b[0m]", self.color(), self.label())
    }
}

/// Shape of a single log line.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub enum Line {
    /// `┣ message`
    Decorated,
    /// `┃   message`
    Indented,
    /// `┃` then `┣ message`
    BlockStart,
    /// `┣[LEVEL] message`
    Level(Level),
    /// `[LEVEL] message` without any pipe
    Standalone(Level),
    /// `┃` then `┗[LEVEL] message`, closing the log
    Exit(Level),
}

/// Main logging interface.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: opens a new conceptual block ("Loaded regions",
///   "Replaying track"). Follow-up lines use `log_decorated!` or `log_indented!`.
/// - **`log_decorated!`**: a line inside the current block.
/// - **`log_indented!`**: nested detail under the previous line.
/// - **`log_pipe!`**: a lone `┃` for spacing, typically before `log_warning!`
///   or `log_error!` when they start their own block.
/// - **`log_version!`** / **`log_end!`**: header and termination marker,
///   each printed once.
/// - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`**:
///   `[LEVEL]`-prefixed lines for messages with semantic weight. Transition
///   alerts are `log_info!` lines.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Whether log output is being copied to a file.
    pub fn is_file_logging() -> bool {
        matches!(LOG_CHANNEL.get(), Some(Some(_)))
    }

    /// Start file logging to the specified path.
    ///
    /// The file is created before any output is redirected, so an
    /// unwritable path is reported here and leaves stdout logging in place.
    /// Output is written by a dedicated thread with ANSI colors stripped.
    /// Dropping the returned guard flushes and closes the file.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let file = std::fs::File::create(&file_path)
            .with_context(|| format!("Failed to create log file {file_path}"))?;

        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(Some(tx.clone()))
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        Ok(LoggerGuard {
            tx,
            handle: Some(spawn_writer(file, file_path, rx)),
        })
    }

    /// Timestamp prefix while replaying a track, empty otherwise.
    ///
    /// Shows the replay clock as `[HH:MM:SS] ` so that alerts line up with
    /// the recorded sample times.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Guard for file logging that ensures clean shutdown.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            // The log file is gone at this point, so stderr is the only place left
            match handle.join() {
                Ok(Err(e)) => eprintln!("geofencer: {e:#}"),
                Err(_) => eprintln!("geofencer: log writer thread panicked"),
                Ok(Ok(())) => {}
            }
        }
    }
}

/// Drain `rx` into `writer` until shutdown or until every sender is gone.
fn spawn_writer<W: Write + Send + 'static>(
    mut writer: W,
    name: String,
    rx: Receiver<LogMessage>,
) -> std::thread::JoinHandle<anyhow::Result<()>> {
    std::thread::spawn(move || {
        while let Ok(LogMessage::Formatted(text)) = rx.recv() {
            writer
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write log file {name}"))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush log file {name}"))
    })
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Skip the parameter bytes up to and including the final 'm'
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Route already formatted text to the log file or stdout.
pub fn write_output(text: &str) {
    // Fall back to stdout once the file writer has stopped
    if let Some(Some(tx)) = LOG_CHANNEL.get()
        && tx
            .send(LogMessage::Formatted(strip_ansi_codes(text)))
            .is_ok()
    {
        return;
    }
    print!("{text}");
    let _ = std::io::stdout().flush();
}

fn format_line(prefix: &str, line: Line, message: &str) -> String {
    match line {
        Line::Decorated => format!("{prefix}┣ {message}\n"),
        Line::Indented => format!("{prefix}┃   {message}\n"),
        Line::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
        Line::Level(level) => format!("{prefix}┣{} {message}\n", level.tag()),
        Line::Standalone(level) => format!("{prefix}{} {message}\n", level.tag()),
        Line::Exit(level) => format!("{prefix}┃\n{prefix}┗{} {message}\n", level.tag()),
    }
}

/// Format and write one line (used by the logging macros).
#[doc(hidden)]
pub fn emit(line: Line, message: &str) {
    if Log::is_enabled() {
        let prefix = Log::get_timestamp_prefix();
        write_output(&format_line(&prefix, line, message));
    }
}

/// Write a bare structural marker (used by the logging macros).
#[doc(hidden)]
pub fn emit_marker(marker: &str) {
    if Log::is_enabled() {
        let prefix = Log::get_timestamp_prefix();
        write_output(&format!("{prefix}{marker}\n"));
    }
}

// # Logging Macros
//
// Each macro accepts either a format string with arguments or a single
// expression implementing Display.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($line:expr, $fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($line, &format!($fmt $($arg)*))
    };
    ($line:expr, $expr:expr) => {
        $crate::logger::emit($line, &$expr.to_string())
    };
}

/// Log a decorated message within the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => { $crate::__log_line!($crate::logger::Line::Decorated, $($arg)+) };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => { $crate::__log_line!($crate::logger::Line::Indented, $($arg)+) };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => { $crate::__log_line!($crate::logger::Line::BlockStart, $($arg)+) };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit_marker("┃")
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit_marker(concat!(
            "┏ geofencer v",
            env!("CARGO_PKG_VERSION"),
            " ━━╸"
        ))
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit_marker("╹")
    };
}

/// Log an informational message with green `[INFO]`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::__log_line!($crate::logger::Line::Level($crate::logger::Level::Info), $($arg)+)
    };
}

/// Log a debug/operational message with green `[DEBUG]`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::__log_line!($crate::logger::Line::Level($crate::logger::Level::Debug), $($arg)+)
    };
}

/// Log a warning message with yellow `[WARNING]`.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::__log_line!($crate::logger::Line::Level($crate::logger::Level::Warning), $($arg)+)
    };
}

/// Log a warning without the pipe prefix (outside of a block).
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)+) => {
        $crate::__log_line!(
            $crate::logger::Line::Standalone($crate::logger::Level::Warning),
            $($arg)+
        )
    };
}

/// Log an error message with red `[ERROR]`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::__log_line!($crate::logger::Line::Level($crate::logger::Level::Error), $($arg)+)
    };
}

/// Log an error that terminates the flow, closing the block with `┗`.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {
        $crate::__log_line!($crate::logger::Line::Exit($crate::logger::Level::Error), $($arg)+)
    };
}
