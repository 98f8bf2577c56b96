//! Model error types
//!
//! Error codes:
//! - SDK_MODEL_CONFLICTING_ALIAS (REJECT)
//! - SDK_MODEL_INVALID_ENUM_VALUE (REJECT)
//! - SDK_MODEL_TYPE_MISMATCH (REJECT)
//! - SDK_MODEL_UNKNOWN_FIELD (REJECT)
//! - SDK_MODEL_UNKNOWN_MODEL (FATAL)
//! - SDK_MODEL_MALFORMED_DESCRIPTOR (FATAL)
//! - SDK_MODEL_DESCRIPTOR_IMMUTABLE (FATAL)

use std::fmt;

use thiserror::Error;

/// Severity levels for model errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller input rejected
    Reject,
    /// Descriptor tables are unusable
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Stable error codes, one per `ModelError` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelErrorCode {
    ConflictingAlias,
    InvalidEnumValue,
    TypeMismatch,
    UnknownField,
    UnknownModel,
    MalformedDescriptor,
    DescriptorImmutable,
}

impl ModelErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ModelErrorCode::ConflictingAlias => "SDK_MODEL_CONFLICTING_ALIAS",
            ModelErrorCode::InvalidEnumValue => "SDK_MODEL_INVALID_ENUM_VALUE",
            ModelErrorCode::TypeMismatch => "SDK_MODEL_TYPE_MISMATCH",
            ModelErrorCode::UnknownField => "SDK_MODEL_UNKNOWN_FIELD",
            ModelErrorCode::UnknownModel => "SDK_MODEL_UNKNOWN_MODEL",
            ModelErrorCode::MalformedDescriptor => "SDK_MODEL_MALFORMED_DESCRIPTOR",
            ModelErrorCode::DescriptorImmutable => "SDK_MODEL_DESCRIPTOR_IMMUTABLE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ModelErrorCode::UnknownModel
            | ModelErrorCode::MalformedDescriptor
            | ModelErrorCode::DescriptorImmutable => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for ModelErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by hydration, assignment and descriptor registration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Both casing variants of one field were supplied in the same input
    #[error("{model}: cannot provide both '{wire_key}' and '{field}'")]
    ConflictingAlias {
        model: String,
        wire_key: String,
        field: String,
    },

    /// Strict enum field assigned a value outside its set
    #[error("{model}.{field}: invalid value '{value}', must be one of [{}]", .allowed.join(", "))]
    InvalidEnumValue {
        model: String,
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Value cannot be converted to the declared type
    #[error("{model}.{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        model: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("{model}: no field named '{field}'")]
    UnknownField { model: String, field: String },

    #[error("model '{0}' is not registered")]
    UnknownModel(String),

    #[error("malformed descriptor '{source_name}': {reason}")]
    MalformedDescriptor { source_name: String, reason: String },

    #[error("model '{0}' is already registered")]
    DescriptorImmutable(String),
}

impl ModelError {
    pub fn conflicting_alias(
        model: impl Into<String>,
        wire_key: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        ModelError::ConflictingAlias {
            model: model.into(),
            wire_key: wire_key.into(),
            field: field.into(),
        }
    }

    pub fn invalid_enum_value(
        model: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        allowed: &[String],
    ) -> Self {
        ModelError::InvalidEnumValue {
            model: model.into(),
            field: field.into(),
            value: value.into(),
            allowed: allowed.to_vec(),
        }
    }

    pub fn type_mismatch(
        model: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ModelError::TypeMismatch {
            model: model.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        ModelError::UnknownField {
            model: model.into(),
            field: field.into(),
        }
    }

    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::MalformedDescriptor {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ModelErrorCode {
        match self {
            ModelError::ConflictingAlias { .. } => ModelErrorCode::ConflictingAlias,
            ModelError::InvalidEnumValue { .. } => ModelErrorCode::InvalidEnumValue,
            ModelError::TypeMismatch { .. } => ModelErrorCode::TypeMismatch,
            ModelError::UnknownField { .. } => ModelErrorCode::UnknownField,
            ModelError::UnknownModel(_) => ModelErrorCode::UnknownModel,
            ModelError::MalformedDescriptor { .. } => ModelErrorCode::MalformedDescriptor,
            ModelError::DescriptorImmutable(_) => ModelErrorCode::DescriptorImmutable,
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ModelErrorCode::ConflictingAlias.code(), "SDK_MODEL_CONFLICTING_ALIAS");
        assert_eq!(ModelErrorCode::InvalidEnumValue.code(), "SDK_MODEL_INVALID_ENUM_VALUE");
        assert_eq!(ModelErrorCode::TypeMismatch.code(), "SDK_MODEL_TYPE_MISMATCH");
        assert_eq!(ModelErrorCode::UnknownModel.code(), "SDK_MODEL_UNKNOWN_MODEL");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(ModelErrorCode::ConflictingAlias.severity(), Severity::Reject);
        assert_eq!(ModelErrorCode::InvalidEnumValue.severity(), Severity::Reject);
        assert_eq!(ModelErrorCode::MalformedDescriptor.severity(), Severity::Fatal);
    }

    #[test]
    fn test_conflicting_alias_names_both_keys() {
        let err = ModelError::conflicting_alias("EncryptedData", "keyId", "key_id");
        let display = err.to_string();
        assert!(display.contains("keyId"));
        assert!(display.contains("key_id"));
        assert_eq!(err.code(), ModelErrorCode::ConflictingAlias);
    }

    #[test]
    fn test_invalid_enum_lists_allowed_values() {
        let allowed = vec!["RAW".to_string(), "DIGEST".to_string()];
        let err =
            ModelError::invalid_enum_value("SignDataDetails", "message_type", "HEX", &allowed);
        let display = err.to_string();
        assert!(display.contains("message_type"));
        assert!(display.contains("RAW, DIGEST"));
        assert!(!err.is_fatal());
    }
}
