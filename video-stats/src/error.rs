//! Error type shared by every YouTube API operation in this crate.

use reqwest::StatusCode;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while extracting channel video data.
///
/// None of these are recovered from locally. The first error aborts the
/// operation in progress and is handed to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a complete response (connect, DNS, timeout, body read).
    #[error("send request to YouTube {endpoint} API")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status code.
    #[error("YouTube {endpoint} API request failed with status {status}: {body}")]
    Remote {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The API answered successfully, but not with the JSON shape we expect.
    #[error("parse YouTube {endpoint} API response as JSON")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// No channel matched the requested handle.
    #[error("no channel found for handle {handle:?}")]
    NotFound { handle: String },

    /// A caller-supplied size was outside what the API accepts.
    #[error("{name} must be between 1 and {max}, got {value}")]
    InvalidArgument {
        name: &'static str,
        value: usize,
        max: usize,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Remote,
    NotFound,
    InvalidArgument,
}

impl Error {
    /// Returns which class of failure this is.
    ///
    /// A malformed payload counts as [`ErrorKind::Remote`]: the server responded, just not
    /// with anything we can use.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Remote { .. } | Error::MalformedResponse { .. } => ErrorKind::Remote,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Returns the HTTP status of a [`Error::Remote`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
