//! Error type for session channels (WebSocket and in-memory).

use crate::direction::Direction;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("protocol violation: {0}")]
    Protocol(String),
    #[error("no response within {0:?}")]
    Timeout(std::time::Duration),
    #[error("session closed")]
    Closed,
    #[error("session not opened")]
    NotOpen,
    #[error("{direction} is not available at {location}")]
    InvalidMove {
        location: String,
        direction: Direction,
    },
}

impl SessionError {
    /// True for malformed or unexpected content, as opposed to I/O trouble.
    pub fn is_protocol(&self) -> bool {
        matches!(self, SessionError::Protocol(_) | SessionError::InvalidMove { .. })
    }
}
