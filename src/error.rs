//! Path-addressed validation errors and the error types shared across phases.

use serde::Serialize;
use serde_json::Value;

use crate::field::FieldPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A mandatory field or structural element is missing.
    Required,
    /// A present value fails a format, range or parse rule.
    Invalid,
    /// A uniqueness constraint over a sequence is violated.
    Duplicate,
    /// A well-formed value that is not allowed in its context.
    Forbidden,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Required => write!(f, "Required value"),
            ErrorKind::Invalid => write!(f, "Invalid value"),
            ErrorKind::Duplicate => write!(f, "Duplicate value"),
            ErrorKind::Forbidden => write!(f, "Forbidden"),
        }
    }
}

/// One violation found in a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub kind: ErrorKind,
    /// Rendered field path, e.g. `spec.networkSpec.subnets[0].name`.
    pub field: String,
    pub bad_value: Value,
    pub detail: String,
}

/// The result of every validator: empty means valid.
pub type ErrorList = Vec<FieldError>;

impl FieldError {
    pub fn required(path: &FieldPath, detail: impl Into<String>) -> Self {
        FieldError {
            kind: ErrorKind::Required,
            field: path.to_string(),
            bad_value: Value::Null,
            detail: detail.into(),
        }
    }

    pub fn invalid(path: &FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        FieldError {
            kind: ErrorKind::Invalid,
            field: path.to_string(),
            bad_value: value.into(),
            detail: detail.into(),
        }
    }

    pub fn duplicate(path: &FieldPath, value: impl Into<Value>) -> Self {
        FieldError {
            kind: ErrorKind::Duplicate,
            field: path.to_string(),
            bad_value: value.into(),
            detail: String::new(),
        }
    }

    pub fn forbidden(path: &FieldPath, detail: impl Into<String>) -> Self {
        FieldError {
            kind: ErrorKind::Forbidden,
            field: path.to_string(),
            bad_value: Value::Null,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Required | ErrorKind::Forbidden => {
                write!(f, "{}: {}: {}", self.field, self.kind, self.detail)
            }
            ErrorKind::Invalid | ErrorKind::Duplicate => {
                write!(f, "{}: {}: {}", self.field, self.kind, self.bad_value)?;
                if !self.detail.is_empty() {
                    write!(f, ": {}", self.detail)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Aggregate error for a resource that failed validation.
///
/// Renders as one line per violation, in the order they were found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", render_lines(.errors))]
pub struct InvalidSpec {
    pub kind: &'static str,
    pub name: String,
    pub errors: ErrorList,
}

impl InvalidSpec {
    /// `Ok(())` for an empty list, the aggregate otherwise.
    pub fn from_errors(
        kind: &'static str,
        name: impl Into<String>,
        errors: ErrorList,
    ) -> Result<(), InvalidSpec> {
        if errors.is_empty() {
            return Ok(());
        }
        Err(InvalidSpec {
            kind,
            name: name.into(),
            errors,
        })
    }
}

fn render_lines(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A document that could not be decoded into the typed model.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Rule data that cannot be turned into a usable rule set.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid name pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid bound for {field}: {reason}")]
    Bound { field: &'static str, reason: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
