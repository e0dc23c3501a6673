use std::fmt;

/// Failures talking to the score backend. Always transient from the game's
/// point of view: callers log them and fall back, they are never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, DNS or timeout failure.
    Transport(String),
    /// Backend answered with a non-success status.
    Status(u16),
    /// Response body did not match the expected shape.
    Decode(String),
    /// Score outside the range the backend accepts.
    InvalidScore(u32),
    /// No backend configured.
    Unavailable,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status(code) => write!(f, "backend returned HTTP {code}"),
            ApiError::Decode(msg) => write!(f, "malformed response: {msg}"),
            ApiError::InvalidScore(score) => write!(f, "score {score} out of range"),
            ApiError::Unavailable => write!(f, "score service unavailable"),
        }
    }
}

impl std::error::Error for ApiError {}
