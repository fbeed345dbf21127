//! # RustSkillServer
//!
//! Request/response contract of a voice-assistant skill protocol.
//! Inbound requests are decoded into [`SkillRequest`], checked for
//! freshness and application identity, and mined for the session, user,
//! intent and slot values. Outbound replies are assembled with the
//! chained [`SkillResponse`] builder and serialized for the transport.
//!
//! Transport, signature verification and intent routing live outside
//! this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use skillserver::prelude::*;
//!
//! fn handle(body: &str) -> Result<String> {
//!     let request = SkillRequest::from_json(body)?;
//!     let mut response = SkillResponse::new();
//!
//!     if !request.verify_app_id("amzn1.ask.skill.demo") {
//!         response.output_speech("This skill is not configured for you.");
//!         return response.to_json();
//!     }
//!
//!     match request.intent_name() {
//!         "GetWeather" => {
//!             let city = request.slot_value("City").unwrap_or("your area");
//!             response
//!                 .output_speech(&format!("It is sunny in {}.", city))
//!                 .simple_card("Weather", city);
//!         }
//!         "LaunchRequest" => {
//!             response
//!                 .output_speech("Which city?")
//!                 .reprompt("Which city would you like the weather for?")
//!                 .end_session(false);
//!         }
//!         _ => {
//!             response.output_speech("Goodbye.");
//!         }
//!     }
//!
//!     response.to_json()
//! }
//!
//! let body = r#"{
//!     "version": "1.0",
//!     "session": {"application": {"applicationId": "amzn1.ask.skill.demo"}},
//!     "request": {"type": "LaunchRequest", "requestId": "r1", "timestamp": "2024-03-01T12:00:00Z"}
//! }"#;
//! let json = handle(body).unwrap();
//! assert!(json.contains("\"shouldEndSession\":false"));
//! ```

pub mod core;
pub mod protocol;
pub mod config;
pub mod error;

// Request side
pub use crate::core::{parse_timestamp, RequestValidator};
pub use protocol::{Intent, RequestType, SkillRequest, Slot};

// Response side
pub use protocol::{
    CanFulfillAnswer, CanFulfillIntent, Card, ClearBehavior, Directive, OutputSpeech,
    PlayBehavior, SkillResponse,
};

// Configuration exports
pub use config::ValidatorConfig;

// Error exports
pub use error::{Result, SkillError};

// Re-export common dependencies for convenience
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value as JsonValue};
pub use chrono::{DateTime, Utc};

/// Prelude module for convenient importing
pub mod prelude {
    pub use crate::{
        SkillRequest, SkillResponse, RequestValidator, ValidatorConfig,
        RequestType, Intent, Slot,
        Directive, PlayBehavior, ClearBehavior,
        CanFulfillAnswer, CanFulfillIntent,
        SkillError, Result,
        JsonValue, json,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
