use thiserror::Error;

use crate::http::request::Method;
use crate::http::response::StatusCode;

/// Errors raised while turning connection bytes into a [`Request`].
///
/// [`Request`]: crate::http::request::Request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The client sent bytes that are not a well-formed request.
    #[error("malformed request: {reason}")]
    Malformed { reason: String },

    /// The request parsed, but speaks a version this server does not.
    #[error("unsupported http version: {version}")]
    UnsupportedVersion { version: String },
}

impl ProtocolError {
    pub fn malformed<S: ToString>(reason: S) -> Self {
        Self::Malformed { reason: reason.to_string() }
    }

    pub fn unsupported_version<S: ToString>(version: S) -> Self {
        Self::UnsupportedVersion { version: version.to_string() }
    }
}

/// Why the connection pipeline answered with its own error response
/// instead of a handler's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("no handler registered for method {0}")]
    NoHandler(Method),
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::Protocol(ProtocolError::Malformed { .. }) => StatusCode::BadRequest,
            Rejection::Protocol(ProtocolError::UnsupportedVersion { .. }) => {
                StatusCode::HttpVersionNotSupported
            }
            Rejection::NoHandler(_) => StatusCode::NotFound,
        }
    }
}
