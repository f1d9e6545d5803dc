//! Exploration stack frame.

use serde::Serialize;

use crate::direction::Direction;

/// One entry of the depth-first stack: a location's place in the discovery tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub key: String,
    /// `None` only for the root.
    pub parent: Option<String>,
    /// Direction taken from `parent` to get here; `None` only for the root.
    pub entry: Option<Direction>,
}

impl Frame {
    pub fn root(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parent: None,
            entry: None,
        }
    }

    pub fn child(key: impl Into<String>, parent: impl Into<String>, entry: Direction) -> Self {
        Self {
            key: key.into(),
            parent: Some(parent.into()),
            entry: Some(entry),
        }
    }

    /// Move that returns from this frame to its parent.
    pub fn backtrack_direction(&self) -> Option<Direction> {
        self.entry.map(Direction::reverse)
    }
}
