//! Error types for RestModel operations.

use std::fmt;

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for all RestModel operations.
#[derive(Debug)]
pub enum Error {
    /// Configuration errors (missing domain, bad client setup)
    Config(ConfigError),
    /// Field coercion errors
    Coercion(CoercionError),
    /// Failure signaled by the response envelope, or a malformed envelope
    Fail(FailResponse),
    /// Transport-level errors (connection, status)
    Transport(TransportError),
    /// Operation needs an id but the id field is null
    MissingId(&'static str),
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// A field could not accept a raw value.
///
/// `source` preserves the underlying parse error when one exists, so the
/// original cause is not lost behind the generic message.
#[derive(Debug)]
pub struct CoercionError {
    /// Field the value was being assigned to, when known
    pub field: Option<String>,
    /// The kind the field expected
    pub expected: &'static str,
    /// Description of the rejected value
    pub actual: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Failure reported by the backend envelope.
///
/// Carries the envelope's `message` verbatim and its numeric `code` when
/// present. Malformed envelopes (non-JSON bodies, missing status) are also
/// reported through this type with a descriptive message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailResponse {
    pub message: String,
    pub code: Option<i64>,
}

#[derive(Debug)]
pub struct TransportError {
    pub message: String,
    /// HTTP status when the response made it back
    pub status: Option<u16>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Build a configuration error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(ConfigError {
            message: message.into(),
            source: None,
        })
    }

    /// Build an envelope failure from a message alone.
    pub fn fail(message: impl Into<String>) -> Self {
        Error::Fail(FailResponse {
            message: message.into(),
            code: None,
        })
    }

    /// Build a transport error from a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(TransportError {
            message: message.into(),
            status: None,
            source: None,
        })
    }
}

impl CoercionError {
    /// Create a coercion error for an expected kind and a rejected value.
    pub fn new(expected: &'static str, actual: impl Into<String>) -> Self {
        Self {
            field: None,
            expected,
            actual: actual.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attach the field name, keeping an existing one if already set.
    #[must_use]
    pub fn for_field(mut self, field: &str) -> Self {
        if self.field.is_none() {
            self.field = Some(field.to_string());
        }
        self
    }
}

impl FailResponse {
    pub fn new(message: impl Into<String>, code: Option<i64>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration error: {}", e.message),
            Error::Coercion(e) => fmt::Display::fmt(e, f),
            Error::Fail(e) => fmt::Display::fmt(e, f),
            Error::Transport(e) => match e.status {
                Some(status) => write!(f, "transport error (HTTP {status}): {}", e.message),
                None => write!(f, "transport error: {}", e.message),
            },
            Error::MissingId(resource) => {
                write!(f, "resource '{resource}' has no id set")
            }
        }
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "cannot set value '{}' on field '{}' of kind '{}'",
                self.actual, field, self.expected
            ),
            None => write!(
                f,
                "cannot coerce value '{}' to kind '{}'",
                self.actual, self.expected
            ),
        }
    }
}

impl fmt::Display for FailResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "request failed with error {code} ({})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

fn as_dyn_error(
    source: &Option<Box<dyn std::error::Error + Send + Sync>>,
) -> Option<&(dyn std::error::Error + 'static)> {
    source
        .as_deref()
        .map(|s| s as &(dyn std::error::Error + 'static))
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => as_dyn_error(&e.source),
            Error::Coercion(e) => as_dyn_error(&e.source),
            Error::Transport(e) => as_dyn_error(&e.source),
            Error::Fail(_) | Error::MissingId(_) => None,
        }
    }
}

impl std::error::Error for CoercionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        as_dyn_error(&self.source)
    }
}

impl std::error::Error for FailResponse {}

impl From<CoercionError> for Error {
    fn from(e: CoercionError) -> Self {
        Error::Coercion(e)
    }
}

impl From<FailResponse> for Error {
    fn from(e: FailResponse) -> Self {
        Error::Fail(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_display_includes_code_and_message() {
        let err = Error::Fail(FailResponse::new("bad", Some(42)));
        assert_eq!(err.to_string(), "request failed with error 42 (bad)");
    }

    #[test]
    fn fail_display_without_code_is_message_only() {
        let err = Error::Fail(FailResponse::new("no response key", None));
        assert_eq!(err.to_string(), "no response key");
    }

    #[test]
    fn coercion_display_names_the_field() {
        let err = CoercionError::new("integer", "abc").for_field("age");
        assert_eq!(
            err.to_string(),
            "cannot set value 'abc' on field 'age' of kind 'integer'"
        );
    }

    #[test]
    fn coercion_keeps_first_field_name() {
        let err = CoercionError::new("integer", "abc")
            .for_field("age")
            .for_field("outer");
        assert_eq!(err.field.as_deref(), Some("age"));
    }

    #[test]
    fn coercion_source_is_preserved() {
        let cause = "x".parse::<i64>().unwrap_err();
        let err: Error = CoercionError::new("integer", "x").with_source(cause).into();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn missing_id_display_names_the_resource() {
        let err = Error::MissingId("Car");
        assert_eq!(err.to_string(), "resource 'Car' has no id set");
    }

    #[test]
    fn transport_display_includes_status() {
        let err = Error::Transport(TransportError {
            message: "server error".to_string(),
            status: Some(500),
            source: None,
        });
        assert_eq!(err.to_string(), "transport error (HTTP 500): server error");
    }
}
