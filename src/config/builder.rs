//! Default configuration file creation.
//!
//! The default file is assembled with [`ConfigBuilder`] so that every
//! setting gets an aligned explanatory comment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Create a default config file at `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    Ok(())
}

/// Contents of the default configuration file.
pub fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Stream")
        .add_comment("Small movements are dropped before the monitor sees them, so a")
        .add_comment("crossing that ends less than min_distance past a boundary is not")
        .add_comment("reported until the position moves further. Use 0 for tight fences.")
        .add_setting(
            "min_distance",
            &format!("{DEFAULT_MIN_DISTANCE:.1}"),
            "Minimum movement in meters between delivered samples (0 = deliver all)",
        )
        .add_setting(
            "output",
            &format!("\"{}\"", DEFAULT_OUTPUT.as_str()),
            "Alert output: \"text\" or \"json\"",
        )
        .add_section("Regions")
        .add_table_array("regions")
        .add_setting(
            "id",
            &format!("\"{DEFAULT_REGION_ID}\""),
            "Unique region id",
        )
        .add_setting(
            "label",
            &format!("\"{DEFAULT_REGION_LABEL}\""),
            "Name used in alerts (optional)",
        )
        .add_setting(
            "latitude",
            &format!("{DEFAULT_REGION_LATITUDE:.6}"),
            "Center latitude (-90 to 90)",
        )
        .add_setting(
            "longitude",
            &format!("{DEFAULT_REGION_LONGITUDE:.6}"),
            "Center longitude (-180 to 180)",
        )
        .add_setting(
            "radius",
            &format!("{DEFAULT_REGION_RADIUS:.1}"),
            "Radius in meters (> 0)",
        )
        .build()
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Comment(String),
    TableArray(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_comment(mut self, text: &str) -> Self {
        self.entries.push(ConfigEntry::Comment(format!("# {text}")));
        self
    }

    fn add_table_array(mut self, name: &str) -> Self {
        self.entries.push(ConfigEntry::TableArray(format!("[[{name}]]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // Align all comments one space past the longest setting line
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(title);
                }
                ConfigEntry::Comment(line) | ConfigEntry::TableArray(line) => result.push(line),
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        let mut content = result.join("\n");
        content.push('\n');
        content
    }
}
