use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Decode an explicit `null` the same way as a missing member
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Inbound skill request envelope.
///
/// Every member tolerates absence on decode so that session-less requests
/// (audio player events, for instance) still parse; accessors answer with
/// empty values rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SkillRequest {
    /// Protocol version string
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,

    /// Conversation session descriptor
    #[serde(deserialize_with = "null_as_default")]
    pub session: Session,

    /// Request body
    #[serde(deserialize_with = "null_as_default")]
    pub request: RequestBody,

    /// Platform context descriptor
    #[serde(deserialize_with = "null_as_default")]
    pub context: Context,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "null_as_default")]
    pub new: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub application: Application,
    #[serde(deserialize_with = "null_as_default")]
    pub attributes: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Platform context. Populated on every request, including those that
/// carry no session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Context {
    #[serde(rename = "System", deserialize_with = "null_as_default")]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ContextApplication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ContextUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Permissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub request_type: RequestType,
    #[serde(deserialize_with = "null_as_default")]
    pub request_id: String,
    /// ISO-8601 UTC instant, e.g. `2024-03-01T12:00:00Z`
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    /// Only meaningful for intent and can-fulfill requests
    #[serde(deserialize_with = "null_as_default")]
    pub intent: Intent,
    /// Why the platform closed the session (session-ended requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub message: HashMap<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Intent {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slots: HashMap<String, Slot>,
}

/// A named parameter extracted from the utterance.
///
/// The embedded `name` normally mirrors the key it is stored under in
/// [`Intent::slots`], but lookups always go through the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Slot {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Request type tag. Unknown tags are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Intent,
    Launch,
    SessionEnded,
    CanFulfillIntent,
    Other(String),
}

impl RequestType {
    pub const INTENT: &'static str = "IntentRequest";
    pub const LAUNCH: &'static str = "LaunchRequest";
    pub const SESSION_ENDED: &'static str = "SessionEndedRequest";
    pub const CAN_FULFILL_INTENT: &'static str = "CanFulfillIntentRequest";

    /// Wire representation of the tag
    pub fn as_str(&self) -> &str {
        match self {
            RequestType::Intent => Self::INTENT,
            RequestType::Launch => Self::LAUNCH,
            RequestType::SessionEnded => Self::SESSION_ENDED,
            RequestType::CanFulfillIntent => Self::CAN_FULFILL_INTENT,
            RequestType::Other(tag) => tag,
        }
    }
}

impl Default for RequestType {
    fn default() -> Self {
        RequestType::Other(String::new())
    }
}

impl From<String> for RequestType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            Self::INTENT => RequestType::Intent,
            Self::LAUNCH => RequestType::Launch,
            Self::SESSION_ENDED => RequestType::SessionEnded,
            Self::CAN_FULFILL_INTENT => RequestType::CanFulfillIntent,
            _ => RequestType::Other(tag),
        }
    }
}

impl From<&str> for RequestType {
    fn from(tag: &str) -> Self {
        RequestType::from(tag.to_string())
    }
}

impl From<RequestType> for String {
    fn from(request_type: RequestType) -> Self {
        match request_type {
            RequestType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
