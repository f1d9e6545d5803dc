//! Error type for an exploration run.

use crate::session::SessionError;

/// Fatal conditions; each aborts the run. Exhaustion is not an error (see `Outcome::Exhausted`).
#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error("transport failure at {location} after {moves} moves: {source}")]
    Transport {
        location: String,
        moves: u64,
        #[source]
        source: SessionError,
    },
    #[error("protocol violation at {location} after {moves} moves: {source}")]
    Protocol {
        location: String,
        moves: u64,
        #[source]
        source: SessionError,
    },
    #[error("desynchronized after {moves} moves: expected {believed}, session reports {actual} and no known path leads back")]
    Desynchronized {
        believed: String,
        actual: String,
        moves: u64,
    },
    #[error("move budget of {limit} exhausted at {location}")]
    MoveBudgetExceeded { limit: u64, location: String },
    /// Explorer state contradicts itself; never expected in a correct run.
    #[error("inconsistent explorer state at {location} after {moves} moves: {reason}")]
    Inconsistent {
        location: String,
        moves: u64,
        reason: String,
    },
}

impl ExploreError {
    pub(crate) fn session(source: SessionError, location: &str, moves: u64) -> Self {
        let location = location.to_string();
        if source.is_protocol() {
            ExploreError::Protocol {
                location,
                moves,
                source,
            }
        } else {
            ExploreError::Transport {
                location,
                moves,
                source,
            }
        }
    }

    /// Last location the session reported before the failure.
    pub fn location(&self) -> &str {
        match self {
            ExploreError::Transport { location, .. }
            | ExploreError::Protocol { location, .. }
            | ExploreError::MoveBudgetExceeded { location, .. }
            | ExploreError::Inconsistent { location, .. } => location,
            ExploreError::Desynchronized { actual, .. } => actual,
        }
    }

    /// Moves issued before the failure.
    pub fn moves(&self) -> u64 {
        match self {
            ExploreError::Transport { moves, .. }
            | ExploreError::Protocol { moves, .. }
            | ExploreError::Desynchronized { moves, .. }
            | ExploreError::Inconsistent { moves, .. } => *moves,
            ExploreError::MoveBudgetExceeded { limit, .. } => *limit,
        }
    }
}
