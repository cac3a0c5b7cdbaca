//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::RecordType;

/// A single zone or record defect found by the validation engine.
///
/// Validation never stops at the first problem; callers receive a `Vec` of these.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ValidationError {
    /// A priority was set on a type that does not carry one
    #[error("{record_type} record must not carry a priority")]
    UnexpectedPriority { record_type: RecordType },

    /// A required field (`name`, `value`, `priority`) is missing or empty
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A/AAAA value is not a valid address of the right family
    #[error("Invalid {record_type} address: '{value}'")]
    InvalidAddressFormat {
        record_type: RecordType,
        value: String,
    },

    /// Value is not a syntactically valid hostname
    #[error("Invalid hostname: '{value}'")]
    InvalidHostnameFormat { value: String },

    /// TTL must be strictly positive
    #[error("TTL must be positive, got {ttl}")]
    InvalidTtl { ttl: u32 },

    /// Priority outside `0..=65535`
    #[error("Priority {priority} out of range 0-65535")]
    PriorityOutOfRange { priority: u32 },

    /// Zone name empty, containing whitespace or illegal characters
    #[error("Invalid zone name: '{name}'")]
    InvalidZoneName { name: String },

    /// Serial is not a 10-digit `YYYYMMDDnn` value
    #[error("Invalid zone serial {serial}: expected 10 digits (YYYYMMDDnn)")]
    InvalidSerial { serial: u32 },

    /// Zone has no SOA record
    #[error("Zone is missing SOA record")]
    MissingSoa,

    /// Zone has no NS record
    #[error("Zone is missing NS record(s)")]
    MissingNs,

    /// More than one CNAME at the same label
    #[error("Duplicate CNAME for name: {name}")]
    DuplicateCname { name: String },

    /// A CNAME shares its label with another record type (strict mode only)
    #[error("CNAME at '{name}' conflicts with {other} record")]
    CnameConflict { name: String, other: RecordType },

    /// A record-level error, tagged with the record it came from
    #[error("Record ({record_type} {name}): {error}")]
    Record {
        record_type: RecordType,
        name: String,
        error: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Wrap a record-level error with the record's `(type, name)`.
    #[must_use]
    pub fn in_record(record_type: RecordType, name: &str, error: Self) -> Self {
        Self::Record {
            record_type,
            name: name.to_string(),
            error: Box::new(error),
        }
    }

    /// The underlying error, with any record context peeled off.
    #[must_use]
    pub fn kind(&self) -> &Self {
        match self {
            Self::Record { error, .. } => error.kind(),
            other => other,
        }
    }
}

/// Why a single zone file line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ParseErrorKind {
    /// Continuation line with no earlier owner name to inherit
    #[error("record has no name and no previous name to inherit")]
    MissingRecordName,

    /// Line ended before a required field
    #[error("missing {expected}")]
    MissingField { expected: String },

    /// Type token outside the supported set
    #[error("unknown record type '{0}'")]
    UnknownRecordType(String),

    /// TTL token that is not a number (with optional unit suffix)
    #[error("invalid TTL '{0}'")]
    InvalidTtl(String),

    /// Non-numeric MX/SRV priority
    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    /// `$INCLUDE`, `$GENERATE` and friends
    #[error("unsupported directive '{0}'")]
    UnsupportedDirective(String),

    /// `(` without `)` or the reverse
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
}

/// A rejected zone file line, carrying its 1-based line number and text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("line {line}: {kind} (`{text}`)")]
pub struct ParseError {
    /// 1-based line number where the record starts
    pub line: usize,
    /// The offending text, comments stripped
    pub text: String,
    /// What went wrong
    pub kind: ParseErrorKind,
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Record type outside the supported set
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    /// Zone or record failed validation; carries every defect found
    #[error("Validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// Zone file had malformed lines; carries every line error found
    #[error("Zone file parse failed with {} error(s)", .0.len())]
    ParseFailed(Vec<ParseError>),

    /// Zone not found
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// A zone with this name already exists
    #[error("Zone already exists: {0}")]
    ZoneExists(String),

    /// Record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Provider identifier outside the supported set
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Provider collaborator failure
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Missing adapter or unreadable configuration file
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownRecordType(_)
            | Self::ValidationFailed(_)
            | Self::ParseFailed(_)
            | Self::ZoneNotFound(_)
            | Self::ZoneExists(_)
            | Self::RecordNotFound(_)
            | Self::UnsupportedProvider(_) => true,
            Self::ProviderError { .. }
            | Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::InvalidConfig(_) => false,
        }
    }

    /// Flattened human-readable detail lines (one per accumulated error).
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed(errors) => errors.iter().map(ToString::to_string).collect(),
            Self::ParseFailed(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_display_is_prefixed() {
        let e = ValidationError::in_record(
            RecordType::A,
            "www",
            ValidationError::InvalidAddressFormat {
                record_type: RecordType::A,
                value: "999.1.1.1".to_string(),
            },
        );
        assert_eq!(
            e.to_string(),
            "Record (A www): Invalid A address: '999.1.1.1'"
        );
    }

    #[test]
    fn kind_peels_record_context() {
        let e = ValidationError::in_record(
            RecordType::Mx,
            "@",
            ValidationError::MissingRequiredField {
                field: "priority".to_string(),
            },
        );
        assert!(matches!(
            e.kind(),
            ValidationError::MissingRequiredField { field } if field == "priority"
        ));
        assert_eq!(ValidationError::MissingSoa.kind(), &ValidationError::MissingSoa);
    }

    #[test]
    fn parse_error_display_carries_line() {
        let e = ParseError {
            line: 7,
            text: "www IN BOGUS 1.2.3.4".to_string(),
            kind: ParseErrorKind::UnknownRecordType("BOGUS".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "line 7: unknown record type 'BOGUS' (`www IN BOGUS 1.2.3.4`)"
        );
    }

    #[test]
    fn validation_failed_serializes_with_code() {
        let e = CoreError::ValidationFailed(vec![ValidationError::MissingSoa]);
        let json = serde_json::to_string(&e).unwrap_or_default();
        assert!(json.contains("\"code\":\"ValidationFailed\""));
        assert!(json.contains("\"code\":\"MissingSoa\""));
    }

    #[test]
    fn expected_classification() {
        assert!(CoreError::ZoneNotFound("x".into()).is_expected());
        assert!(CoreError::ValidationFailed(vec![]).is_expected());
        assert!(!CoreError::StorageError("disk".into()).is_expected());
    }

    #[test]
    fn details_flattens_accumulated_errors() {
        let e = CoreError::ValidationFailed(vec![
            ValidationError::MissingSoa,
            ValidationError::MissingNs,
        ]);
        assert_eq!(
            e.details(),
            vec![
                "Zone is missing SOA record".to_string(),
                "Zone is missing NS record(s)".to_string()
            ]
        );
    }
}
