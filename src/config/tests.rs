use super::builder::default_config_content;
use super::validation::validate_config;
use super::*;
use crate::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn region(id: &str, latitude: f64, longitude: f64, radius: f64) -> RegionConfig {
    RegionConfig {
        id: id.to_string(),
        label: None,
        latitude,
        longitude,
        radius,
    }
}

fn create_test_config(regions: Vec<RegionConfig>) -> Config {
    Config {
        min_distance: Some(1.0),
        output: Some(OutputFormat::Text),
        regions,
    }
}

fn standard_regions() -> Vec<RegionConfig> {
    vec![
        region(
            "home",
            TEST_HOME_LATITUDE,
            TEST_HOME_LONGITUDE,
            TEST_HOME_RADIUS,
        ),
        region(
            "office",
            TEST_OFFICE_LATITUDE,
            TEST_OFFICE_LONGITUDE,
            TEST_OFFICE_RADIUS,
        ),
    ]
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("geofencer").join("geofencer.toml");

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.regions.len(), 1);
    assert_eq!(config.regions[0].id, "home");
}

#[test]
fn test_default_config_content_parses_and_validates() {
    let content = default_config_content();
    let config: Config = toml::from_str(&content).unwrap();

    assert!(validate_config(&config).is_ok());
    assert_eq!(config.min_distance, Some(1.0));
    assert_eq!(config.output, Some(OutputFormat::Text));

    let regions = config.regions();
    assert_eq!(regions[0].id, "home");
    assert_eq!(regions[0].label.as_deref(), Some("Home"));
    assert_eq!(regions[0].radius, 10.0);
    assert!((regions[0].center.latitude - -1.894114).abs() < 1e-9);
}

#[test]
fn test_default_config_explains_min_distance_trade_off() {
    let content = default_config_content();
    let lines: Vec<&str> = content.lines().collect();
    let setting = lines
        .iter()
        .position(|line| line.starts_with("min_distance = "))
        .unwrap();

    let note = lines[1..setting].join("\n");
    assert!(lines[1..setting].iter().all(|line| line.starts_with("# ")));
    assert!(note.contains("less than min_distance past a boundary"));
    assert!(note.contains("Use 0 for tight fences"));
}

#[test]
fn test_default_config_comments_are_aligned() {
    let content = default_config_content();
    let columns: Vec<usize> = content
        .lines()
        .filter(|line| line.contains(" = "))
        .filter_map(|line| line.find(" # "))
        .collect();

    assert!(!columns.is_empty());
    assert!(columns.iter().all(|&column| column == columns[0]));
}

#[test]
fn test_load_from_path_reads_multiple_regions() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("geofencer.toml");
    fs::write(
        &path,
        r#"
min_distance = 0.0
output = "json"

[[regions]]
id = "office"
latitude = -1.9536
longitude = 30.0605
radius = 250.0

[[regions]]
id = "home"
label = "Home"
latitude = -1.8938
longitude = 30.0565
radius = 100.0
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();

    assert_eq!(config.min_distance(), 0.0);
    assert_eq!(config.output(), OutputFormat::Json);
    let ids: Vec<_> = config.regions().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["office", "home"]);
}

#[test]
fn test_load_from_path_missing_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_load_from_path_rejects_unknown_output() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("geofencer.toml");
    fs::write(
        &path,
        "output = \"xml\"\n[[regions]]\nid = \"a\"\nlatitude = 0.0\nlongitude = 0.0\nradius = 1.0\n",
    )
    .unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn test_defaults_when_settings_omitted() {
    let config = Config {
        min_distance: None,
        output: None,
        regions: standard_regions(),
    };

    assert_eq!(config.min_distance(), 1.0);
    assert_eq!(config.output(), OutputFormat::Text);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_basic() {
    assert!(validate_config(&create_test_config(standard_regions())).is_ok());
}

#[test]
fn test_config_validation_min_distance_range() {
    let mut config = create_test_config(standard_regions());

    config.min_distance = Some(0.0);
    assert!(validate_config(&config).is_ok());

    config.min_distance = Some(-1.0);
    assert!(validate_config(&config).is_err());

    config.min_distance = Some(20_000.0);
    assert!(validate_config(&config).is_err());

    config.min_distance = Some(f64::NAN);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_config_validation_requires_regions() {
    let config = create_test_config(Vec::new());
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("[[regions]]"));
}

#[test]
fn test_config_validation_duplicate_ids() {
    let mut regions = standard_regions();
    regions.push(region("home", 10.0, 10.0, 5.0));

    let err = validate_config(&create_test_config(regions)).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate region id 'home'"));
}

#[test]
fn test_config_validation_non_positive_radius() {
    for radius in [0.0, -10.0] {
        let regions = vec![region("home", 0.0, 0.0, radius)];
        let err = validate_config(&create_test_config(regions)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid radius"));
    }
}

#[test]
fn test_config_validation_coordinate_ranges() {
    let regions = vec![region("north", 91.0, 0.0, 10.0)];
    assert!(validate_config(&create_test_config(regions)).is_err());

    let regions = vec![region("east", 0.0, 180.5, 10.0)];
    assert!(validate_config(&create_test_config(regions)).is_err());

    let regions = vec![region("edge", -90.0, -180.0, 10.0)];
    assert!(validate_config(&create_test_config(regions)).is_ok());
}

#[test]
fn test_config_validation_empty_id() {
    let regions = vec![region("  ", 0.0, 0.0, 10.0)];
    assert!(validate_config(&create_test_config(regions)).is_err());
}
