/*!
 * Validator configuration loading tests
 */

use skillserver::*;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_json_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"timestampToleranceSecs": 90, "maxClockSkewSecs": 10, "requireAppId": false}}"#
    )
    .unwrap();

    let config = ValidatorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timestamp_tolerance, Duration::from_secs(90));
    assert_eq!(config.max_clock_skew, Duration::from_secs(10));
    assert!(!config.require_app_id);
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"timestampToleranceSecs": 0}}"#).unwrap();

    assert!(matches!(
        ValidatorConfig::from_file(file.path()),
        Err(SkillError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ValidatorConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(SkillError::Io(_))));
}

#[cfg(feature = "yaml-support")]
#[test]
fn test_load_yaml_config_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "timestampToleranceSecs: 45").unwrap();
    writeln!(file, "maxClockSkewSecs: 5").unwrap();

    let config = ValidatorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timestamp_tolerance, Duration::from_secs(45));
    assert!(config.require_app_id);
}

#[cfg(not(feature = "yaml-support"))]
#[test]
fn test_yaml_config_requires_feature() {
    let file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    assert!(matches!(
        ValidatorConfig::from_file(file.path()),
        Err(SkillError::InvalidConfig(_))
    ));
}
