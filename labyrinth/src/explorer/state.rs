//! Explorer run state: phase, per-step action, and the single owned [`SessionState`].

use serde::Serialize;
use serde_json::Value;

use super::frame::Frame;
use crate::direction::Direction;
use crate::graph::MazeGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Exploring,
    /// Replaying a known path back to the top-of-stack location.
    Recovering,
    Solved,
    Exhausted,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Solved | Phase::Exhausted)
    }
}

/// What one call to `Explorer::step` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replayed `path` to get back to the top-of-stack location.
    Recover { path: Vec<Direction> },
    /// Moved into a new location and pushed a frame for it.
    Descend { direction: Direction, to: String },
    /// Moved into an already known location, recorded the edge and moved straight back.
    Merge { direction: Direction, to: String },
    /// Popped an exhausted frame and moved back towards its parent.
    Backtrack { direction: Direction, to: String },
    /// Popped the exhausted root frame; the stack is now empty.
    Pop { key: String },
    /// Run is over; see the phase.
    Finish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub phase: Phase,
}

/// Run limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerOptions {
    /// Abort with `ExploreError::MoveBudgetExceeded` once this many moves were issued.
    pub max_moves: Option<u64>,
}

/// Everything one run mutates. Owned by the explorer; nothing else writes to it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub graph: MazeGraph,
    pub stack: Vec<Frame>,
    /// Location the session last reported.
    pub position: String,
    pub phase: Phase,
    pub moves: u64,
    /// Every move issued, in order.
    pub path: Vec<Direction>,
    pub start_key: String,
    pub start_payload: Value,
    /// Payload of the last reported location.
    pub last_payload: Value,
}

impl SessionState {
    pub(crate) fn new(graph: MazeGraph, start_key: String, start_payload: Value) -> Self {
        Self {
            graph,
            stack: vec![Frame::root(start_key.clone())],
            position: start_key.clone(),
            phase: Phase::Exploring,
            moves: 0,
            path: Vec::new(),
            start_key,
            last_payload: start_payload.clone(),
            start_payload,
        }
    }

    pub fn top(&self) -> Option<&Frame> {
        self.stack.last()
    }
}
