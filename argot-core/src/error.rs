use thiserror::Error;
use std::fmt;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("Unknown option '{option}' for command '{command}'")]
    UnknownOption {
        command: String,
        option: String,
    },

    #[error("Missing value for option '{0}'")]
    MissingOptionValue(String),

    #[error("Unexpected argument: '{0}'")]
    UnexpectedArgument(String),

    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    #[error("Invalid value '{value}' for {property}: {reason}")]
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },

    #[error("{}", FieldErrors(.0))]
    Binding(Vec<FieldError>),

    #[error("Invalid command schema: {0}")]
    Schema(String),

    #[error("Invalid catalog manifest: {0}")]
    Manifest(String),

    #[error("Target does not accept bound values: {0}")]
    Target(#[from] serde_json::Error),
}

/// A single field that failed to bind. The binder collects these for every
/// field before reporting, so one bad value does not hide another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    MissingRequiredParameter(String),
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },
}

impl FieldError {
    pub fn property(&self) -> &str {
        match self {
            FieldError::MissingRequiredParameter(property) => property,
            FieldError::InvalidValue { property, .. } => property,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::MissingRequiredParameter(property) => {
                write!(f, "Missing required parameter: {}", property)
            }
            FieldError::InvalidValue { property, value, reason } => {
                write!(f, "Invalid value '{}' for {}: {}", value, property, reason)
            }
        }
    }
}

impl From<FieldError> for Error {
    fn from(error: FieldError) -> Self {
        match error {
            FieldError::MissingRequiredParameter(property) => Error::MissingRequiredParameter(property),
            FieldError::InvalidValue { property, value, reason } => Error::InvalidValue { property, value, reason },
        }
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
