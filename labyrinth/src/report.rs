//! Run result handed to the presentation layer.

use serde::Serialize;
use serde_json::Value;

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// An exit (location without directions) was reached.
    Solved,
    /// Every reachable location was mapped and none was an exit.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Payload of the start location.
    pub start: Value,
    /// Payload of the exit when solved, else of the last reported location.
    pub end: Value,
    pub moves: u64,
    pub locations: usize,
    /// Every move issued, in order.
    pub path: Vec<Direction>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}
