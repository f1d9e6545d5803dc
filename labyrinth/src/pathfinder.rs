//! Unweighted shortest path over the discovered part of the maze.

use std::collections::{HashMap, VecDeque};

use crate::direction::Direction;
use crate::graph::MazeGraph;

/// `to` cannot be reached from `from` through recorded edges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no known path from {from} to {to}")]
pub struct NoPath {
    pub from: String,
    pub to: String,
}

/// Breadth-first search from `from` to `to`; returns the directions to replay, in order.
///
/// Only recorded edges are followed. Neighbors are expanded in discovery order, so among
/// equally short paths the one through earlier-discovered edges wins.
pub fn shortest_path(graph: &MazeGraph, from: &str, to: &str) -> Result<Vec<Direction>, NoPath> {
    let no_path = || NoPath {
        from: from.to_string(),
        to: to.to_string(),
    };
    if !graph.contains(from) || !graph.contains(to) {
        return Err(no_path());
    }
    if from == to {
        return Ok(Vec::new());
    }

    // child -> (parent, direction taken from parent)
    let mut parents: HashMap<&str, (&str, Direction)> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(from);

    while let Some(key) = queue.pop_front() {
        for (direction, next) in graph.neighbors_of(key) {
            let next = next.as_str();
            if next == from || parents.contains_key(next) {
                continue;
            }
            parents.insert(next, (key, *direction));
            if next == to {
                return Ok(unwind(&parents, from, to));
            }
            queue.push_back(next);
        }
    }
    Err(no_path())
}

fn unwind(parents: &HashMap<&str, (&str, Direction)>, from: &str, to: &str) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut cursor = to;
    while cursor != from {
        match parents.get(cursor) {
            Some((parent, direction)) => {
                path.push(*direction);
                cursor = *parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
