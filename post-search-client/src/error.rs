use std::time::Duration;

/// Coarse classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ErrorKind {
    Connection,
    Timeout,
    Decode,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request for tag '{tag}' failed: {message}")]
    Request { tag: String, message: String },
    #[error("upstream answered {status} for tag '{tag}'")]
    Status { tag: String, status: u16 },
    #[error("could not decode posts for tag '{tag}': {source}")]
    Decode {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request for tag '{tag}' timed out after {after:?}")]
    Timeout { tag: String, after: Duration },
    #[error("aggregation did not finish within {0:?}")]
    Deadline(Duration),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Request { .. } | Error::Status { .. } => ErrorKind::Connection,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Timeout { .. } | Error::Deadline(_) => ErrorKind::Timeout,
        }
    }

    /// Tag whose query produced the error, if the error belongs to a single tag.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Error::Request { tag, .. }
            | Error::Status { tag, .. }
            | Error::Decode { tag, .. }
            | Error::Timeout { tag, .. } => Some(tag),
            Error::Deadline(_) => None,
        }
    }
}
