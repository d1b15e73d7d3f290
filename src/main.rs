//! Main application entry point.
//!
//! Parses the command line and dispatches to the library:
//! - `run` / `replay`: `Geofencer` builder, optionally with a log file
//! - `distance`, `check`, `help`: one-shot commands
//!
//! Errors from any command are reported once here and end the process
//! with a failure exit code.

use anyhow::Result;
use std::path::PathBuf;

use geofencer::args::{self, CliAction, ParsedArgs};
use geofencer::commands;
use geofencer::config::{OutputFormat, set_config_dir};
use geofencer::constants::EXIT_FAILURE;
use geofencer::logger::{Log, LoggerGuard};
use geofencer::{Geofencer, log_error_exit, log_pipe};

fn main() {
    let parsed_args = ParsedArgs::from_env();
    let mut log_guard: Option<LoggerGuard> = None;

    if let Err(e) = dispatch(parsed_args.action, &mut log_guard) {
        if Log::is_enabled() {
            log_pipe!();
            log_error_exit!("{:#}", e);
        } else {
            eprintln!("geofencer: {e:#}");
        }
        // Flush the log file before exiting
        drop(log_guard);
        std::process::exit(EXIT_FAILURE);
    }
}

fn dispatch(action: CliAction, log_guard: &mut Option<LoggerGuard>) -> Result<()> {
    match action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref());
            Ok(())
        }
        CliAction::Distance { from, to } => {
            commands::distance::run_distance_command(from, to);
            Ok(())
        }
        CliAction::Check {
            debug_enabled,
            config_dir,
        } => {
            set_config_dir(config_dir)?;
            commands::check::run_check_command(debug_enabled)
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            input,
            json,
            log_file,
        } => {
            set_config_dir(config_dir)?;
            *log_guard = start_log_file(log_file)?;

            let mut runner = runner(debug_enabled, json);
            if let Some(path) = input {
                runner = runner.with_input_file(PathBuf::from(path));
            }
            runner.run()?;
            Ok(())
        }
        CliAction::Replay {
            debug_enabled,
            config_dir,
            file,
            multiplier,
            json,
            log_file,
        } => {
            set_config_dir(config_dir)?;
            *log_guard = start_log_file(log_file)?;

            runner(debug_enabled, json)
                .replay(PathBuf::from(file), multiplier)
                .run()?;
            Ok(())
        }
    }
}

fn runner(debug_enabled: bool, json: bool) -> Geofencer {
    let runner = Geofencer::new(debug_enabled);
    if json {
        runner.with_output(OutputFormat::Json)
    } else {
        runner
    }
}

fn start_log_file(log_file: Option<String>) -> Result<Option<LoggerGuard>> {
    log_file.map(Log::start_file_logging).transpose()
}
