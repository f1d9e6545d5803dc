//! # Protocol module
//!
//! Wire types exchanged with the remote maze session over one WebSocket.
//!
//! - On connect the session pushes one unsolicited location message (the start).
//! - Client sends [`MoveRequest`]: `{"command": "go <direction>"}`.
//! - Session answers with one location message of the same shape as the greeting.
//!
//! Location message: `{"id": "<key>", "availableDirections": ["up", ...], ...}`. Fields other
//! than `id` and `availableDirections` are opaque; the whole object is kept in
//! [`LocationView::payload`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::direction::Direction;
use crate::session::SessionError;

// -----------------------------------------------------------------------------
// Requests (client → session)
// -----------------------------------------------------------------------------

/// Move request: one `go` command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub command: String,
}

impl MoveRequest {
    pub fn go(direction: Direction) -> Self {
        Self {
            command: format!("go {}", direction),
        }
    }

    /// Direction named by a `go <direction>` command, if well formed.
    pub fn direction(&self) -> Option<Direction> {
        self.command.strip_prefix("go ")?.trim().parse().ok()
    }
}

// -----------------------------------------------------------------------------
// Responses (session → client)
// -----------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationFields {
    id: String,
    available_directions: Vec<String>,
}

/// One location as described by the session (greeting or move response).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationView {
    pub id: String,
    /// Directions in the order the session reported them; duplicates dropped.
    pub available_directions: Vec<Direction>,
    /// The full inbound object, verbatim.
    pub payload: Value,
}

impl LocationView {
    /// Builds a view with a payload synthesized from `id` and the directions.
    pub fn new(id: impl Into<String>, available_directions: Vec<Direction>) -> Self {
        let id = id.into();
        let payload = serde_json::json!({
            "id": id,
            "availableDirections": available_directions,
        });
        Self {
            id,
            available_directions,
            payload,
        }
    }

    /// Parses one inbound text message.
    pub fn from_json(text: &str) -> Result<Self, SessionError> {
        let payload: Value = serde_json::from_str(text)
            .map_err(|e| SessionError::Protocol(format!("invalid json: {}", e)))?;
        Self::from_value(payload)
    }

    /// Interprets an already-parsed message; `payload` is stored as is.
    pub fn from_value(payload: Value) -> Result<Self, SessionError> {
        if !payload.is_object() {
            return Err(SessionError::Protocol(format!(
                "expected a location object, got {}",
                payload
            )));
        }
        let fields = LocationFields::deserialize(&payload)
            .map_err(|e| SessionError::Protocol(format!("malformed location: {}", e)))?;

        let mut available_directions = Vec::with_capacity(fields.available_directions.len());
        for label in &fields.available_directions {
            let d: Direction = label
                .parse()
                .map_err(|e| SessionError::Protocol(format!("location {}: {}", fields.id, e)))?;
            if !available_directions.contains(&d) {
                available_directions.push(d);
            }
        }

        Ok(Self {
            id: fields.id,
            available_directions,
            payload,
        })
    }

    /// Zero available directions marks the maze exit.
    pub fn is_exit(&self) -> bool {
        self.available_directions.is_empty()
    }
}
