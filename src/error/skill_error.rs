use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced by the skill protocol core.
///
/// Only slot lookups, encoding/decoding and the explicit validation gate
/// can fail. Every other accessor answers with an empty value instead.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SkillError {
    #[error("Slot name not found: {0}")]
    SlotNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request verification failed: {0}")]
    VerificationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl SkillError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            SkillError::SlotNotFound(_) => "SLOT_NOT_FOUND",
            SkillError::Serialization(_) => "SERIALIZATION_ERROR",
            SkillError::Deserialization(_) => "DESERIALIZATION_ERROR",
            SkillError::VerificationFailed(_) => "VERIFICATION_FAILED",
            SkillError::InvalidConfig(_) => "INVALID_CONFIG",
            SkillError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<std::io::Error> for SkillError {
    fn from(error: std::io::Error) -> Self {
        SkillError::Io(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SkillError::SlotNotFound("City".to_string());
        assert_eq!(err.to_string(), "Slot name not found: City");
        assert_eq!(err.code(), "SLOT_NOT_FOUND");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: SkillError = io.into();
        assert!(matches!(err, SkillError::Io(ref msg) if msg.contains("missing.json")));
    }
}
