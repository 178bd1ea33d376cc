//! Unified error type.

use std::fmt;

/// The error type returned by portico's fallible operations.
///
/// Application-level outcomes (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// the two things that can actually fail: infrastructure (binding a port,
/// accepting a connection) and the pipeline itself (a wrapper or the terminal
/// handler giving up on a request).
#[derive(Debug)]
pub enum Error {
    /// Socket-level failure while serving.
    Io(std::io::Error),
    /// A wrapper or handler gave up on the request. The server answers
    /// `500 Internal Server Error` with an empty body.
    Handler(String),
}

impl Error {
    /// Shorthand for a pipeline failure.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Handler(msg) => write!(f, "handler: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Handler(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
