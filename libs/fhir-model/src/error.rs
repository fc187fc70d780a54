//! Error types for the FHIR model
//!
//! Every failure raised by a builder is a [`ValidationError`]. Validation is
//! fail-fast: the first violated rule is reported and no instance is produced.

use std::fmt;
use thiserror::Error;

/// Structural validation failure raised from `build()`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required element: '{path}'")]
    MissingRequiredField { path: String },

    #[error("Repeating element: '{path}' {defect} at index {index}")]
    MalformedList {
        path: String,
        index: usize,
        defect: ListDefect,
    },

    #[error("Invalid type: {found} for choice element: '{path}' must be one of: {allowed:?}")]
    ChoiceTypeViolation {
        path: String,
        found: &'static str,
        allowed: &'static [&'static str],
    },

    #[error("Invalid reference '{reference}' for element: '{path}': {defect}")]
    ReferenceTargetViolation {
        path: String,
        reference: String,
        defect: ReferenceDefect,
    },

    #[error("ele-1: element '{path}' must have a @value or children")]
    EmptyElementViolation { path: String },

    #[error("Invalid value for element: '{path}': {message}")]
    InvalidValue { path: String, message: String },
}

impl ValidationError {
    /// Path of the offending field (e.g. `Account.coverage` or `Account.identifier`)
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRequiredField { path }
            | Self::MalformedList { path, .. }
            | Self::ChoiceTypeViolation { path, .. }
            | Self::ReferenceTargetViolation { path, .. }
            | Self::EmptyElementViolation { path }
            | Self::InvalidValue { path, .. } => path,
        }
    }

    /// Coarse classification of the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::MalformedList { .. } => ErrorKind::MalformedList,
            Self::ChoiceTypeViolation { .. } => ErrorKind::ChoiceTypeViolation,
            Self::ReferenceTargetViolation { .. } => ErrorKind::ReferenceTargetViolation,
            Self::EmptyElementViolation { .. } => ErrorKind::EmptyElementViolation,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
        }
    }

    pub(crate) fn invalid_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Discriminant of [`ValidationError`], handy for logging and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    MalformedList,
    ChoiceTypeViolation,
    ReferenceTargetViolation,
    EmptyElementViolation,
    InvalidValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingRequiredField => "missing-required-field",
            Self::MalformedList => "malformed-list",
            Self::ChoiceTypeViolation => "choice-type-violation",
            Self::ReferenceTargetViolation => "reference-target-violation",
            Self::EmptyElementViolation => "empty-element",
            Self::InvalidValue => "invalid-value",
        };
        f.write_str(name)
    }
}

/// What is wrong with an entry of a repeating element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDefect {
    /// The entry is absent (a hole in the list)
    NullEntry,
    /// The entry is of a type the element does not permit
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for ListDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullEntry => f.write_str("does not permit null elements"),
            Self::WrongType { expected, found } => {
                write!(f, "contains type: {} but must be: {}", found, expected)
            }
        }
    }
}

/// Why a reference does not conform to its element's declared targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDefect {
    /// The literal is relative but no resource type could be found in it
    MissingResourceType,
    /// The type name found is not a resource type at all
    UnknownResourceType { found: String },
    /// The type name is a resource type, but not one this element accepts
    TargetNotAllowed {
        found: String,
        allowed: &'static [&'static str],
    },
    /// `Reference.type` disagrees with the type found in the literal
    TypeMismatch { literal: String, declared: String },
}

impl fmt::Display for ReferenceDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingResourceType => f.write_str("resource type not found in reference value"),
            Self::UnknownResourceType { found } => {
                write!(f, "'{}' must be a valid resource type name", found)
            }
            Self::TargetNotAllowed { found, allowed } => {
                write!(f, "resource type '{}' must be one of: {:?}", found, allowed)
            }
            Self::TypeMismatch { literal, declared } => write!(
                f,
                "resource type '{}' in reference value does not match Reference.type: {}",
                literal, declared
            ),
        }
    }
}

/// Failure while loading or installing a [`crate::ModelConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
