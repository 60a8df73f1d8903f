use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Machine-readable code carried by a [`BindError`].
///
/// Hosts are expected to branch on this code when translating a binding
/// failure into an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BindErrorCode {
    /// One or more required parameters were absent from the merged raw
    /// arguments.
    ArgumentMissing,
    /// A supplied value failed coercion for its configured field.
    ArgumentFormat,
}

impl fmt::Display for BindErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindErrorCode::ArgumentMissing => write!(f, "ARGUMENT_MISSING"),
            BindErrorCode::ArgumentFormat => write!(f, "ARGUMENT_FORMAT"),
        }
    }
}

/// Binding failure surfaced to the host application.
///
/// Raised synchronously while resolving arguments; the target function is
/// never invoked once one of these is produced. The status code defaults to
/// 200 and is only a hint — hosts override it with [`BindError::with_status`]
/// or map `error_code` themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindError {
    /// Stable error code for host-side dispatch.
    pub error_code: BindErrorCode,
    /// Human-readable message naming the offending field or value.
    pub error_msg: String,
    /// Suggested HTTP status code, default 200.
    pub status_code: u16,
}

impl BindError {
    /// Create an error with the default status code.
    pub fn new(error_code: BindErrorCode, error_msg: impl Into<String>) -> Self {
        BindError {
            error_code,
            error_msg: error_msg.into(),
            status_code: StatusCode::OK.as_u16(),
        }
    }

    /// Override the suggested status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Required parameters absent from the merged raw arguments.
    pub fn argument_missing(handler: &str, missing: &[String]) -> Self {
        Self::new(
            BindErrorCode::ArgumentMissing,
            format!("{}() required argument not found: {:?}", handler, missing),
        )
    }

    /// A value failed coercion under the named format.
    pub fn argument_format(format: &str, value: &Value) -> Self {
        Self::new(
            BindErrorCode::ArgumentFormat,
            format!("{}() invalid argument format: {}", format, value),
        )
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.error_msg)
    }
}

impl std::error::Error for BindError {}

/// Configuration error detected while building a handler's schema.
///
/// These are programming errors in the handler declaration or the validators
/// mapping, not request failures — they surface once at bind time, before any
/// call is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The declaration string is not of the form `name(params)`.
    InvalidDeclaration {
        /// The offending declaration.
        decl: String,
        /// What was wrong with it.
        detail: String,
    },
    /// A parameter name is not a valid identifier.
    InvalidParameterName {
        /// The offending name.
        name: String,
    },
    /// Variadic collection of extra positional or keyword arguments is not
    /// supported.
    VariadicParameter {
        /// The offending declaration entry, including its `*` marker.
        name: String,
    },
    /// The same parameter name appears twice in the declaration.
    DuplicateParameter {
        /// The duplicated name.
        name: String,
    },
    /// A parameter without a default follows one with a default. Defaults
    /// must form a trailing run so positional invocation stays unambiguous.
    NonTrailingDefault {
        /// The defaulted parameter that precedes a required one.
        name: String,
    },
    /// A declared default is not valid JSON, or failed build-time coercion
    /// through the parameter's configured field.
    InvalidDefault {
        /// The parameter whose default is invalid.
        name: String,
        /// Parse or coercion failure detail.
        detail: String,
    },
    /// The validators mapping names a parameter absent from the signature.
    UnknownParameter {
        /// The handler whose signature was inspected.
        handler: String,
        /// The configured name with no matching parameter.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDeclaration { decl, detail } => {
                write!(f, "invalid handler declaration '{}': {}", decl, detail)
            }
            ConfigError::InvalidParameterName { name } => {
                write!(f, "invalid parameter name '{}'", name)
            }
            ConfigError::VariadicParameter { name } => {
                write!(
                    f,
                    "variadic parameter '{}' is not supported; declare simple positional parameters only",
                    name
                )
            }
            ConfigError::DuplicateParameter { name } => {
                write!(f, "duplicate parameter name '{}'", name)
            }
            ConfigError::NonTrailingDefault { name } => {
                write!(
                    f,
                    "parameter without a default may not follow defaulted parameter '{}'",
                    name
                )
            }
            ConfigError::InvalidDefault { name, detail } => {
                write!(f, "invalid default for parameter '{}': {}", name, detail)
            }
            ConfigError::UnknownParameter { handler, name } => {
                write!(
                    f,
                    "validator configured for '{}' which is not a parameter of {}()",
                    name, handler
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
