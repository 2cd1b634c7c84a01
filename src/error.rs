use colored::Colorize;
use std::fmt;

/// Errors that can occur while binding a record from the environment
///
/// Binding stops at the first error; fields assigned before it keep their new values.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    /// The bind target is not a record, or is an empty `Option`
    InvalidTarget { found: String },
    /// A field annotation could not be interpreted
    InvalidAnnotation {
        field: String,
        key: String,
        value: String,
    },
    /// The declared field type cannot be bound
    InvalidKind { field: String, kind: String },
    /// An `Option` field has no storage to write into
    NilOptionalTarget { field: String },
    /// A required environment variable is missing or empty
    MissingRequired { key: String, field: String },
    /// An environment variable is present but cannot be converted
    Parse {
        key: String,
        field: String,
        declared: String,
        value: String,
        cause: String,
    },
}

impl BindError {
    /// Environment variable the error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            BindError::MissingRequired { key, .. } | BindError::Parse { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Replaces the field the error is attributed to with a full field path
    pub fn at(self, path: &str) -> Self {
        let path = path.to_string();
        match self {
            BindError::InvalidTarget { found } => BindError::InvalidTarget { found },
            BindError::InvalidAnnotation { key, value, .. } => BindError::InvalidAnnotation {
                field: path,
                key,
                value,
            },
            BindError::InvalidKind { kind, .. } => BindError::InvalidKind { field: path, kind },
            BindError::NilOptionalTarget { .. } => BindError::NilOptionalTarget { field: path },
            BindError::MissingRequired { key, .. } => BindError::MissingRequired { key, field: path },
            BindError::Parse {
                key,
                declared,
                value,
                cause,
                ..
            } => BindError::Parse {
                key,
                field: path,
                declared,
                value,
                cause,
            },
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::InvalidTarget { found } => {
                write!(
                    f,
                    "Bind target must be a record, received {}",
                    found.yellow().bold()
                )
            }
            BindError::InvalidAnnotation { field, key, value } => {
                write!(
                    f,
                    "{}: Annotation {} must have a boolean value, got {}",
                    field.magenta().bold(),
                    key.bold(),
                    format!("'{}'", value).red(),
                )
            }
            BindError::InvalidKind { field, kind } => {
                write!(
                    f,
                    "{}: Type {} cannot be bound from the environment",
                    field.magenta().bold(),
                    kind.yellow().bold()
                )
            }
            BindError::NilOptionalTarget { field } => {
                write!(
                    f,
                    "{}: Optional field is None and has no storage to bind into",
                    field.magenta().bold()
                )
            }
            BindError::MissingRequired { key, field } => {
                write!(
                    f,
                    "{}: Is missing from environment and is required",
                    key.magenta().bold()
                )?;
                write!(f, " (field {})", field)
            }
            BindError::Parse {
                key,
                field,
                declared,
                value,
                cause,
            } => {
                writeln!(
                    f,
                    "{}: Invalid value {} for {}",
                    key.magenta().bold(),
                    format!("'{}'", value).red(),
                    declared.yellow(),
                )?;
                write!(f, "\tField: {}\n\tCause: {}", field, cause)
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Formats a bind error into the panic message used by `FromEnv::load`
pub fn format_bind_error(record: &str, error: &BindError) -> String {
    format!(
        "Configuration {} failed to load:\n  - {}",
        record.yellow().bold(),
        error
    )
}
