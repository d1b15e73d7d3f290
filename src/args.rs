//! Command-line argument parsing and processing.
//!
//! Arguments are split into flags, which may appear anywhere, and positional
//! words, the first of which selects the command. Coordinates are positional
//! too, so a leading minus followed by a digit is read as a number rather
//! than a flag.

use crate::geo::Coordinate;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Monitor samples from a file, or stdin when no file is given
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        input: Option<String>,
        json: bool,
        log_file: Option<String>,
    },
    /// Replay a timestamped track at the given speed (0 = instant)
    Replay {
        debug_enabled: bool,
        config_dir: Option<String>,
        file: String,
        multiplier: f64,
        json: bool,
        log_file: Option<String>,
    },
    /// Print the great-circle distance between two coordinates
    Distance { from: Coordinate, to: Coordinate },
    /// Validate the configuration and list its regions
    Check {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Show help for a command, or general help
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// A word starting with '-' that is not a negative number.
fn is_flag(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-')
        && !matches!(chars.next(), Some(c) if c.is_ascii_digit() || c == '.')
}

fn parse_coordinate(latitude: &str, longitude: &str) -> Option<Coordinate> {
    match (latitude.parse::<f64>(), longitude.parse::<f64>()) {
        (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => {
            Some(Coordinate::new(lat, lon))
        }
        _ => None,
    }
}

fn usage_error(message: &str) -> ParsedArgs {
    log_warning!("{}", message);
    ParsedArgs {
        action: CliAction::ShowHelpDueToError,
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut json = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut unknown_arg_found = false;
        let mut positional: Vec<String> = Vec::new();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = &args_vec[i];
            if !is_flag(arg_str) {
                positional.push(arg_str.clone());
                i += 1;
                continue;
            }

            match arg_str.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" => {
                    if i + 1 < args_vec.len() && !is_flag(&args_vec[i + 1]) {
                        config_dir = Some(args_vec[i + 1].clone());
                        i += 1;
                    } else {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                }
                "--log" => {
                    if i + 1 < args_vec.len() && !is_flag(&args_vec[i + 1]) {
                        log_file = Some(args_vec[i + 1].clone());
                        i += 1;
                    } else {
                        log_warning!("Missing file for --log. Usage: --log <file>");
                        unknown_arg_found = true;
                    }
                }
                _ => {
                    log_warning!("Unknown argument: {}", arg_str);
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        // Help and version take precedence over everything else
        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let command = positional.first().map(String::as_str);
        let operands = positional.get(1..).unwrap_or_default();

        let action = match command {
            None => CliAction::Run {
                debug_enabled,
                config_dir,
                input: None,
                json,
                log_file,
            },
            Some("run") => {
                if operands.len() > 1 {
                    return usage_error("Too many arguments. Usage: geofencer run [FILE]");
                }
                CliAction::Run {
                    debug_enabled,
                    config_dir,
                    input: operands.first().cloned(),
                    json,
                    log_file,
                }
            }
            Some("replay") => {
                let (file, multiplier) = match operands {
                    [file] => (file.clone(), crate::constants::DEFAULT_REPLAY_MULTIPLIER),
                    [file, multiplier] => match multiplier.parse::<f64>() {
                        Ok(m) if m.is_finite() && m >= 0.0 => (file.clone(), m),
                        _ => {
                            return usage_error(&format!(
                                "Invalid multiplier '{multiplier}'. Use a number >= 0 (0 = instant)"
                            ));
                        }
                    },
                    _ => {
                        return usage_error("Usage: geofencer replay <FILE> [MULTIPLIER]");
                    }
                };
                CliAction::Replay {
                    debug_enabled,
                    config_dir,
                    file,
                    multiplier,
                    json,
                    log_file,
                }
            }
            Some("distance") => {
                let [lat1, lon1, lat2, lon2] = operands else {
                    return usage_error(
                        "Missing coordinates. Usage: geofencer distance <LAT1> <LON1> <LAT2> <LON2>",
                    );
                };
                match (parse_coordinate(lat1, lon1), parse_coordinate(lat2, lon2)) {
                    (Some(from), Some(to)) => CliAction::Distance { from, to },
                    _ => return usage_error("Coordinates must be finite decimal degrees"),
                }
            }
            Some("check") => {
                if !operands.is_empty() {
                    return usage_error("Usage: geofencer check");
                }
                CliAction::Check {
                    debug_enabled,
                    config_dir,
                }
            }
            Some("help") => CliAction::Help {
                command: operands.first().cloned(),
            },
            Some(unknown) => {
                return usage_error(&format!("Unknown command: {unknown}"));
            }
        };

        ParsedArgs { action }
    }

    /// Parse from the process environment.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("geofencer [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-j, --json             Print alerts as JSON lines on stdout");
    log_indented!("    --log <file>       Write log output to a file");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("run [FILE]                     Monitor samples from FILE or stdin (default)");
    log_indented!("replay <FILE> [MULTIPLIER]     Replay a timestamped track (0 = instant)");
    log_indented!("distance <LAT1> <LON1> <LAT2> <LON2>");
    log_indented!("                               Great-circle distance in meters");
    log_indented!("check                          Validate configuration and list regions");
    log_indented!("help [COMMAND]                 Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["geofencer"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_no_arguments_runs_on_stdin() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
                input: None,
                json: false,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_run_with_file_and_flags_anywhere() {
        assert_eq!(
            parse(&["-d", "run", "walk.csv", "--json", "--config", "/tmp/geo"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/geo".to_string()),
                input: Some("walk.csv".to_string()),
                json: true,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_run_rejects_extra_files() {
        assert_eq!(parse(&["run", "a.csv", "b.csv"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_replay_defaults_to_instant() {
        match parse(&["replay", "walk.csv"]) {
            CliAction::Replay {
                file, multiplier, ..
            } => {
                assert_eq!(file, "walk.csv");
                assert_eq!(multiplier, 0.0);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_replay_with_multiplier_and_log() {
        match parse(&["replay", "walk.csv", "60", "--log", "out.log"]) {
            CliAction::Replay {
                multiplier,
                log_file,
                ..
            } => {
                assert_eq!(multiplier, 60.0);
                assert_eq!(log_file.as_deref(), Some("out.log"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_replay_rejects_negative_multiplier() {
        assert_eq!(
            parse(&["replay", "walk.csv", "-2"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(parse(&["replay"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_distance_accepts_negative_coordinates() {
        assert_eq!(
            parse(&["distance", "-1.894114", "30.056424", "40.7128", "-74.0060"]),
            CliAction::Distance {
                from: Coordinate::new(-1.894114, 30.056424),
                to: Coordinate::new(40.7128, -74.0060),
            }
        );
    }

    #[test]
    fn test_distance_rejects_bad_input() {
        assert_eq!(
            parse(&["distance", "1", "2", "3"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["distance", "1", "north", "3", "4"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["distance", "NaN", "0", "0", "0"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_check_and_help() {
        assert_eq!(
            parse(&["check", "-c", "/etc/geo"]),
            CliAction::Check {
                debug_enabled: false,
                config_dir: Some("/etc/geo".to_string()),
            }
        );
        assert_eq!(
            parse(&["help", "replay"]),
            CliAction::Help {
                command: Some("replay".to_string())
            }
        );
        assert_eq!(parse(&["help"]), CliAction::Help { command: None });
    }

    #[test]
    fn test_help_and_version_take_precedence() {
        assert_eq!(parse(&["run", "--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["--version", "--help"]), CliAction::ShowVersion);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_unknown_input_shows_help() {
        assert_eq!(parse(&["--frobnicate"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["teleport"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--config"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--log", "--json"]), CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_is_flag_distinguishes_negative_numbers() {
        assert!(is_flag("-d"));
        assert!(is_flag("--json"));
        assert!(!is_flag("-1.5"));
        assert!(!is_flag("-.5"));
        assert!(!is_flag("walk.csv"));
    }
}
