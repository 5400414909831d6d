use std::fmt;

use newsfeed_core::Article;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        seq: u64,
        result: Result<Vec<Article>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    InvalidRequest,
    /// Upstream answered with a non-success status.
    HttpStatus(u16),
    /// Only reachable when a request timeout is configured.
    Timeout,
    /// No response: connect, DNS, TLS, reset.
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
}

impl FetchErrorKind {
    /// True when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchErrorKind::Timeout | FetchErrorKind::Network)
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::InvalidRequest => write!(f, "invalid request"),
            FetchErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::Network => write!(f, "network error"),
            FetchErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FetchErrorKind::Decode => write!(f, "undecodable response"),
        }
    }
}
