use crate::config::ValidatorConfig;
use crate::error::{Result, SkillError};
use crate::protocol::request_types::{RequestType, SkillRequest, Slot};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::{debug, warn};
use std::collections::HashMap;

/// Wire layout of request timestamps. Fractional seconds are tolerated.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Parse a request timestamp as a UTC instant
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Applies the freshness and application-identity checks under a
/// configurable set of tolerances.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    config: ValidatorConfig,
}

impl RequestValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Freshness check against the current wall clock
    pub fn is_timestamp_fresh(&self, request: &SkillRequest) -> bool {
        self.is_timestamp_fresh_at(request, Utc::now())
    }

    /// Freshness check against an explicit instant.
    ///
    /// True iff the request is strictly younger than the tolerance and no
    /// further in the future than the allowed clock skew. A timestamp that
    /// cannot be parsed is never fresh.
    pub fn is_timestamp_fresh_at(&self, request: &SkillRequest, now: DateTime<Utc>) -> bool {
        let raw = request.request.timestamp.as_str();
        let Some(issued_at) = parse_timestamp(raw) else {
            warn!("Rejecting request {}: malformed timestamp '{}'", request.request.request_id, raw);
            return false;
        };

        let (Ok(tolerance), Ok(skew)) = (
            chrono::Duration::from_std(self.config.timestamp_tolerance),
            chrono::Duration::from_std(self.config.max_clock_skew),
        ) else {
            warn!("Validator tolerances out of range, treating request as stale");
            return false;
        };

        let elapsed = now.signed_duration_since(issued_at);
        let fresh = elapsed < tolerance && elapsed >= -skew;
        if !fresh {
            debug!(
                "Request {} timestamp {} is {}s old, outside tolerance",
                request.request.request_id,
                raw,
                elapsed.num_seconds()
            );
        }
        fresh
    }

    /// Run every configured check, reporting the first that fails
    pub fn validate(&self, request: &SkillRequest, app_id: Option<&str>) -> Result<()> {
        self.check_app_id(request, app_id)?;
        self.check_timestamp(request)
    }

    /// Application identity check, honouring `require_app_id`
    pub fn check_app_id(&self, request: &SkillRequest, app_id: Option<&str>) -> Result<()> {
        match app_id {
            Some(expected) if !request.verify_app_id(expected) => {
                warn!("Application id mismatch for request {}", request.request.request_id);
                Err(SkillError::VerificationFailed(format!(
                    "application id '{}' does not match request",
                    expected
                )))
            }
            None if self.config.require_app_id => Err(SkillError::VerificationFailed(
                "application id is required but none was supplied".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Freshness check as a gate
    pub fn check_timestamp(&self, request: &SkillRequest) -> Result<()> {
        if !self.is_timestamp_fresh(request) {
            return Err(SkillError::VerificationFailed(format!(
                "timestamp '{}' is not within tolerance",
                request.request.timestamp
            )));
        }

        Ok(())
    }
}

impl SkillRequest {
    /// Decode a request from JSON text
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| {
            debug!("Failed to decode skill request: {}", e);
            SkillError::Deserialization(e.to_string())
        })
    }

    /// Decode a request from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            debug!("Failed to decode skill request: {}", e);
            SkillError::Deserialization(e.to_string())
        })
    }

    /// True when the request was issued less than 150 seconds ago
    pub fn verify_timestamp(&self) -> bool {
        RequestValidator::default().is_timestamp_fresh(self)
    }

    /// True when `app_id` matches the session or the context application id.
    /// An empty `app_id` never matches.
    pub fn verify_app_id(&self, app_id: &str) -> bool {
        if app_id.is_empty() {
            return false;
        }

        self.session.application.application_id == app_id
            || self
                .context
                .system
                .application
                .as_ref()
                .and_then(|application| application.application_id.as_deref())
                == Some(app_id)
    }

    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    /// Session user id, or the context user id for session-less requests
    pub fn user_id(&self) -> &str {
        let session_user = self.session.user.user_id.as_str();
        if !session_user.is_empty() {
            return session_user;
        }

        self.context
            .system
            .user
            .as_ref()
            .and_then(|user| user.user_id.as_deref())
            .unwrap_or("")
    }

    pub fn request_type(&self) -> &str {
        self.request.request_type.as_str()
    }

    /// Intent name for intent requests, otherwise the request type tag
    pub fn intent_name(&self) -> &str {
        match self.request.request_type {
            RequestType::Intent => self.request.intent.name.as_str(),
            _ => self.request_type(),
        }
    }

    pub fn slot_value(&self, slot_name: &str) -> Result<&str> {
        match self.request.intent.slots.get(slot_name) {
            Some(slot) => Ok(slot.value.as_str()),
            None => {
                debug!("Slot '{}' not present in intent '{}'", slot_name, self.request.intent.name);
                Err(SkillError::SlotNotFound(slot_name.to_string()))
            }
        }
    }

    pub fn all_slots(&self) -> &HashMap<String, Slot> {
        &self.request.intent.slots
    }

    pub fn request_id(&self) -> &str {
        &self.request.request_id
    }

    pub fn timestamp(&self) -> &str {
        &self.request.timestamp
    }

    pub fn locale(&self) -> &str {
        &self.request.locale
    }

    pub fn reason(&self) -> Option<&str> {
        self.request.reason.as_deref()
    }

    pub fn is_new_session(&self) -> bool {
        self.session.new
    }

    pub fn session_attributes(&self) -> &HashMap<String, serde_json::Value> {
        &self.session.attributes
    }

    pub fn session_attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.session.attributes.get(key)
    }

    /// Account-linking token, preferring the session copy
    pub fn access_token(&self) -> Option<&str> {
        self.session
            .user
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .or_else(|| {
                self.context
                    .system
                    .user
                    .as_ref()
                    .and_then(|user| user.access_token.as_deref())
            })
    }

    pub fn device_id(&self) -> Option<&str> {
        self.context
            .system
            .device
            .as_ref()
            .and_then(|device| device.device_id.as_deref())
    }

    pub fn api_endpoint(&self) -> Option<&str> {
        self.context.system.api_endpoint.as_deref()
    }

    pub fn api_access_token(&self) -> Option<&str> {
        self.context.system.api_access_token.as_deref()
    }

    pub fn consent_token(&self) -> Option<&str> {
        self.context
            .system
            .user
            .as_ref()
            .and_then(|user| user.permissions.as_ref())
            .and_then(|permissions| permissions.consent_token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request_at(timestamp: &str) -> SkillRequest {
        let mut request = SkillRequest::default();
        request.request.request_id = "req-1".to_string();
        request.request.timestamp = timestamp.to_string();
        request
    }

    fn fixed_now() -> DateTime<Utc> {
        parse_timestamp("2024-03-01T12:00:00Z").unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-01T12:00:00Z").is_some());
        assert!(parse_timestamp("2024-03-01T12:00:00.250Z").is_some());
        assert!(parse_timestamp("2024-03-01 12:00:00").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_freshness_boundaries() {
        let validator = RequestValidator::default();
        let now = fixed_now();

        assert!(validator.is_timestamp_fresh_at(&request_at("2024-03-01T12:00:00Z"), now));
        assert!(validator.is_timestamp_fresh_at(&request_at("2024-03-01T11:57:31Z"), now));
        // exactly 150 seconds old
        assert!(!validator.is_timestamp_fresh_at(&request_at("2024-03-01T11:57:30Z"), now));
        assert!(!validator.is_timestamp_fresh_at(&request_at("2024-03-01T11:00:00Z"), now));
    }

    #[test]
    fn test_future_timestamp_beyond_skew() {
        let validator = RequestValidator::default();
        let now = fixed_now();

        let slightly_ahead = (now + Duration::seconds(10)).format("%Y-%m-%dT%H:%M:%SZ").to_string();
        assert!(validator.is_timestamp_fresh_at(&request_at(&slightly_ahead), now));

        let far_ahead = (now + Duration::seconds(600)).format("%Y-%m-%dT%H:%M:%SZ").to_string();
        assert!(!validator.is_timestamp_fresh_at(&request_at(&far_ahead), now));
    }

    #[test]
    fn test_malformed_timestamp_is_stale() {
        let validator = RequestValidator::default();
        assert!(!validator.is_timestamp_fresh_at(&request_at("yesterday"), fixed_now()));
        assert!(!request_at("not-a-time").verify_timestamp());
    }

    #[test]
    fn test_strict_config_shrinks_window() {
        let validator = RequestValidator::new(ValidatorConfig::strict());
        let now = fixed_now();
        assert!(!validator.is_timestamp_fresh_at(&request_at("2024-03-01T11:59:00Z"), now));
        assert!(validator.is_timestamp_fresh_at(&request_at("2024-03-01T11:59:45Z"), now));
    }

    #[test]
    fn test_validate_requires_app_id_by_default() {
        let validator = RequestValidator::default();
        let request = request_at(&Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string());
        assert!(matches!(
            validator.validate(&request, None),
            Err(SkillError::VerificationFailed(_))
        ));

        let lenient = RequestValidator::new(ValidatorConfig::lenient());
        assert!(lenient.validate(&request, None).is_ok());
    }

    #[test]
    fn test_slot_lookup_uses_map_key() {
        let mut request = SkillRequest::default();
        request.request.intent.slots.insert(
            "City".to_string(),
            Slot { name: "Town".to_string(), value: "Paris".to_string() },
        );
        assert_eq!(request.slot_value("City").unwrap(), "Paris");
        assert_eq!(
            request.slot_value("Town"),
            Err(SkillError::SlotNotFound("Town".to_string()))
        );
    }
}
