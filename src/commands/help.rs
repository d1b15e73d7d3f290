//! Help command implementation for geofencer.
//!
//! Shows command-specific help or general help based on the arguments provided.

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("check") => super::check::display_help(),
        Some("distance") => super::distance::display_help(),
        Some("help") => display_help_help(),
        Some("replay") => display_replay_help(),
        Some("run") => display_run_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("run [FILE]                  Monitor samples from FILE or stdin");
    log_indented!("replay <FILE> [MULTIPLIER]  Replay a timestamped track");
    log_indented!("distance <LAT1> <LON1> <LAT2> <LON2>");
    log_indented!("                            Great-circle distance in meters");
    log_indented!("check                       Validate configuration and list regions");
    log_indented!("help [COMMAND]              Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'geofencer help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'geofencer --help' to see all options and general usage.");
    log_end!();
}

fn display_sample_formats() {
    log_block_start!("Sample format (one per line):");
    log_indented!("lat,lon");
    log_indented!("lat,lon,2024-05-01T08:00:00Z");
    log_indented!("{{\"latitude\": -1.89, \"longitude\": 30.05, \"timestamp\": \"...\"}}");
    log_indented!("Blank lines and lines starting with '#' are ignored.");
}

fn display_run_help() {
    log_version!();
    log_block_start!("run - Monitor a position stream (default command)");
    log_block_start!("Usage: geofencer run [OPTIONS] [FILE]");
    log_block_start!("Arguments:");
    log_indented!("FILE  Read samples from FILE instead of stdin");
    log_block_start!("Options:");
    log_indented!("-j, --json        Print alerts as JSON lines on stdout");
    log_indented!("    --log <file>  Write log output to a file");
    display_sample_formats();
    log_block_start!("Examples:");
    log_indented!("gpspipe -w | my-converter | geofencer run");
    log_indented!("geofencer run --json walk.csv > events.jsonl");
    log_end!();
}

fn display_replay_help() {
    log_version!();
    log_block_start!("replay - Replay a recorded track");
    log_block_start!("Usage: geofencer replay [OPTIONS] <FILE> [MULTIPLIER]");
    log_block_start!("Arguments:");
    log_indented!("FILE        Track with timestamped samples");
    log_indented!("MULTIPLIER  Playback speed, e.g. 60 plays an hour in a minute");
    log_indented!("            0 (default) replays instantly");
    log_block_start!("Events are stamped with the recorded sample times.");
    display_sample_formats();
    log_block_start!("Examples:");
    log_indented!("geofencer replay walk.csv");
    log_indented!("geofencer replay walk.csv 60 --log replay.log");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: geofencer help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("geofencer help");
    log_indented!("geofencer help replay");
    log_end!();
}
