use crate::error::{Result, SkillError};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tolerances applied when verifying an inbound skill request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum age of a request timestamp (Default: 150s)
    #[serde(rename = "timestampToleranceSecs", with = "duration_secs")]
    pub timestamp_tolerance: Duration,

    /// How far in the future a timestamp may sit before it is rejected (Default: 150s)
    #[serde(rename = "maxClockSkewSecs", with = "duration_secs")]
    pub max_clock_skew: Duration,

    /// Reject requests when no application id is supplied to the gate (Default: true)
    #[serde(rename = "requireAppId")]
    pub require_app_id: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            timestamp_tolerance: Duration::from_secs(150),
            max_clock_skew: Duration::from_secs(150),
            require_app_id: true,
        }
    }
}

impl ValidatorConfig {
    /// Create a new configuration with all default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Tight tolerances for deployments with well-synchronised clocks
    pub fn strict() -> Self {
        Self {
            timestamp_tolerance: Duration::from_secs(30),
            max_clock_skew: Duration::from_secs(5),
            require_app_id: true,
        }
    }

    /// Relaxed tolerances for local replay and fixtures
    pub fn lenient() -> Self {
        Self {
            timestamp_tolerance: Duration::from_secs(3600),
            max_clock_skew: Duration::from_secs(3600),
            require_app_id: false,
        }
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.timestamp_tolerance.is_zero() {
            return Err(SkillError::InvalidConfig(
                "timestamp_tolerance must be greater than 0".to_string(),
            ));
        }

        let Some(skew_ceiling) = self.timestamp_tolerance.checked_mul(24) else {
            return Err(SkillError::InvalidConfig(format!(
                "timestamp_tolerance ({}s) is out of range",
                self.timestamp_tolerance.as_secs()
            )));
        };

        if self.max_clock_skew > skew_ceiling {
            return Err(SkillError::InvalidConfig(format!(
                "max_clock_skew ({}s) is unreasonably large for timestamp_tolerance ({}s)",
                self.max_clock_skew.as_secs(),
                self.timestamp_tolerance.as_secs()
            )));
        }

        Ok(())
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str).map_err(|e| {
            error!("Failed to parse validator config from JSON: {}", e);
            SkillError::Deserialization(format!("validator config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from YAML
    #[cfg(feature = "yaml-support")]
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml_str).map_err(|e| {
            error!("Failed to parse validator config from YAML: {}", e);
            SkillError::Deserialization(format!("validator config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, picking the format from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading validator config from file: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", content.len(), path.display());

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            #[cfg(feature = "yaml-support")]
            {
                Self::from_yaml(&content)
            }
            #[cfg(not(feature = "yaml-support"))]
            {
                Err(SkillError::InvalidConfig(format!(
                    "YAML support not enabled (file: {}). Enable 'yaml-support' feature.",
                    path.display()
                )))
            }
        } else {
            Self::from_json(&content)
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.timestamp_tolerance, Duration::from_secs(150));
        assert_eq!(config.max_clock_skew, Duration::from_secs(150));
        assert!(config.require_app_id);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ValidatorConfig::strict().validate().is_ok());
        assert!(ValidatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_tolerance_rejected() {
        let config = ValidatorConfig {
            timestamp_tolerance: Duration::ZERO,
            ..ValidatorConfig::default()
        };
        assert!(matches!(config.validate(), Err(SkillError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_tolerance_rejected() {
        let result = ValidatorConfig::from_json(r#"{"timestampToleranceSecs": 18446744073709551615}"#);
        assert!(matches!(result, Err(SkillError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ValidatorConfig::from_json(r#"{"timestampToleranceSecs": 60}"#).unwrap();
        assert_eq!(config.timestamp_tolerance, Duration::from_secs(60));
        assert_eq!(config.max_clock_skew, Duration::from_secs(150));
        assert!(config.require_app_id);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = ValidatorConfig::from_json("{not json");
        assert!(matches!(result, Err(SkillError::Deserialization(_))));
    }
}
