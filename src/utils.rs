//! Small shared helpers.

use std::path::Path;

/// Render a path for display with the home directory replaced by `~`.
///
/// Keeps usernames out of logs that users paste into bug reports.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

/// Format a distance in meters, switching to kilometers past 1 km.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{meters:.1} m")
    }
}
