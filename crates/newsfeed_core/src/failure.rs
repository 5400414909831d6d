use std::fmt;

/// Raw outcome of a failed upstream attempt, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpFailure {
    /// A response arrived with a non-success status.
    Status { code: u16, message: Option<String> },
    /// No response was received (connect, DNS, reset, timeout).
    Transport(String),
    /// Anything else: undecodable body, invalid request, ...
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Unauthorized,
    RateLimited,
    ServerOrClientError,
    NetworkUnreachable,
    Unexpected,
}

/// Maps a failed attempt to its failure kind. Pure and deterministic.
pub fn classify(failure: &HttpFailure) -> FailureKind {
    match failure {
        HttpFailure::Status { code: 429, .. } => FailureKind::RateLimited,
        HttpFailure::Status { code: 401, .. } => FailureKind::Unauthorized,
        HttpFailure::Status { code, .. } if *code >= 400 => FailureKind::ServerOrClientError,
        HttpFailure::Status { .. } => FailureKind::Unexpected,
        HttpFailure::Transport(_) => FailureKind::NetworkUnreachable,
        HttpFailure::Other(_) => FailureKind::Unexpected,
    }
}

impl FailureKind {
    /// User-facing message surfaced while the failure is current.
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::RateLimited => {
                "API rate limit exceeded. Please try again later or upgrade your API plan."
            }
            FailureKind::Unauthorized => {
                "API key is invalid or expired. Please check your API key."
            }
            FailureKind::ServerOrClientError => {
                "Failed to fetch news. Please try again in 5 minutes."
            }
            FailureKind::NetworkUnreachable => {
                "Network error. Please check your internet connection and try again in 5 minutes."
            }
            FailureKind::Unexpected => {
                "An unexpected error occurred. Please try again in 5 minutes."
            }
        }
    }

    /// Whether this kind locks requests out behind the timed cooldown.
    /// `RateLimited` uses the sticky manual-reset gate instead.
    pub fn arms_cooldown(self) -> bool {
        !matches!(self, FailureKind::RateLimited)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::RateLimited => write!(f, "rate limited"),
            FailureKind::ServerOrClientError => write!(f, "server or client error"),
            FailureKind::NetworkUnreachable => write!(f, "network unreachable"),
            FailureKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpFailure::Status { code, message } => match message {
                Some(message) => write!(f, "http status {code}: {message}"),
                None => write!(f, "http status {code}"),
            },
            HttpFailure::Transport(message) => write!(f, "transport failure: {message}"),
            HttpFailure::Other(message) => write!(f, "{message}"),
        }
    }
}
