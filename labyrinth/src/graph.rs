//! Maze graph: locations discovered so far and the directed edges between them.
//!
//! Grows monotonically for one run. Each [`Location`] keeps its neighbors in discovery order;
//! the pathfinder relies on that order to break ties deterministically.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::direction::Direction;
use crate::protocol::LocationView;

/// One discovered location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub key: String,
    /// Directions reported when the location was first visited, in reported order.
    pub available: Vec<Direction>,
    /// Discovered edges, in discovery order. Always a subset of `available`.
    pub neighbors: Vec<(Direction, String)>,
    pub payload: Value,
}

impl Location {
    fn from_view(view: &LocationView) -> Self {
        Self {
            key: view.id.clone(),
            available: view.available_directions.clone(),
            neighbors: Vec::new(),
            payload: view.payload.clone(),
        }
    }

    pub fn neighbor(&self, direction: Direction) -> Option<&str> {
        self.neighbors
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, key)| key.as_str())
    }

    /// First available direction (reported order) without a recorded neighbor.
    pub fn first_unexplored(&self) -> Option<Direction> {
        self.available
            .iter()
            .copied()
            .find(|d| self.neighbor(*d).is_none())
    }

    pub fn is_exit(&self) -> bool {
        self.available.is_empty()
    }

    fn set_neighbor(&mut self, direction: Direction, key: &str) {
        match self.neighbors.iter_mut().find(|(d, _)| *d == direction) {
            Some(slot) => slot.1 = key.to_string(),
            None => self.neighbors.push((direction, key.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MazeGraph {
    locations: BTreeMap<String, Location>,
}

impl MazeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a location on first sight. Returns `false` (and changes nothing) if the key is known.
    pub fn add_location(&mut self, view: &LocationView) -> bool {
        if self.locations.contains_key(&view.id) {
            return false;
        }
        self.locations
            .insert(view.id.clone(), Location::from_view(view));
        true
    }

    /// Sets `from --direction--> to` and back-fills `to --reverse--> from` when that slot is free.
    ///
    /// Returns `false` without recording anything if `from` is unknown or `direction` is not
    /// one of its available directions. The back-fill only happens when `to` is known and lists
    /// the reverse direction.
    pub fn record_edge(&mut self, from: &str, direction: Direction, to: &str) -> bool {
        match self.locations.get_mut(from) {
            Some(origin) if origin.available.contains(&direction) => {
                origin.set_neighbor(direction, to)
            }
            _ => return false,
        }
        let back = direction.reverse();
        if let Some(dest) = self.locations.get_mut(to) {
            if dest.available.contains(&back) && dest.neighbor(back).is_none() {
                dest.neighbors.push((back, from.to_string()));
            }
        }
        true
    }

    pub fn location(&self, key: &str) -> Option<&Location> {
        self.locations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locations.contains_key(key)
    }

    pub fn neighbor(&self, key: &str, direction: Direction) -> Option<&str> {
        self.locations.get(key)?.neighbor(direction)
    }

    /// Discovered `(direction, neighbor)` pairs of `key`, in discovery order. Empty if unknown.
    pub fn neighbors_of(&self, key: &str) -> &[(Direction, String)] {
        self.locations
            .get(key)
            .map(|l| l.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_unexplored(&self, key: &str) -> Option<Direction> {
        self.locations.get(key)?.first_unexplored()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn view(id: &str, dirs: &[Direction]) -> LocationView {
        LocationView::new(id, dirs.to_vec())
    }

    #[test]
    fn add_location_is_idempotent() {
        let mut g = MazeGraph::new();
        assert!(g.add_location(&view("a", &[Right])));
        assert!(!g.add_location(&view("a", &[Left, Up])));
        assert_eq!(g.len(), 1);
        assert_eq!(g.location("a").unwrap().available, vec![Right]);
    }

    #[test]
    fn record_edge_back_fills_reverse() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Right]));
        g.add_location(&view("b", &[Left, Right]));
        assert!(g.record_edge("a", Right, "b"));
        assert_eq!(g.neighbor("a", Right), Some("b"));
        assert_eq!(g.neighbor("b", Left), Some("a"));
        assert_eq!(g.neighbor("b", Right), None);
    }

    #[test]
    fn back_fill_respects_available_directions() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Right]));
        g.add_location(&view("b", &[Up]));
        assert!(g.record_edge("a", Right, "b"));
        assert!(g.neighbors_of("b").is_empty());
    }

    #[test]
    fn back_fill_does_not_overwrite() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Right]));
        g.add_location(&view("c", &[Right]));
        g.add_location(&view("b", &[Left]));
        g.record_edge("a", Right, "b");
        g.record_edge("c", Right, "b");
        assert_eq!(g.neighbor("b", Left), Some("a"));
        assert_eq!(g.neighbor("c", Right), Some("b"));
    }

    #[test]
    fn record_edge_rejects_unknown_origin_and_unavailable_direction() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Right]));
        assert!(!g.record_edge("zz", Right, "a"));
        assert!(!g.record_edge("a", Down, "a"));
        assert!(g.neighbors_of("a").is_empty());
    }

    #[test]
    fn record_edge_overwrites_existing_slot() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Right]));
        g.record_edge("a", Right, "b");
        g.record_edge("a", Right, "c");
        assert_eq!(g.neighbors_of("a"), &[(Right, "c".to_string())]);
    }

    #[test]
    fn first_unexplored_follows_reported_order() {
        let mut g = MazeGraph::new();
        g.add_location(&view("a", &[Down, Right, Up]));
        g.add_location(&view("b", &[Up]));
        assert_eq!(g.first_unexplored("a"), Some(Down));
        g.record_edge("a", Down, "b");
        assert_eq!(g.first_unexplored("a"), Some(Right));
        assert_eq!(g.first_unexplored("b"), None);
        assert_eq!(g.first_unexplored("missing"), None);
    }

    #[test]
    fn neighbors_keep_discovery_order() {
        let mut g = MazeGraph::new();
        g.add_location(&view("hub", &[Up, Right, Down]));
        g.record_edge("hub", Down, "s");
        g.record_edge("hub", Up, "n");
        let dirs: Vec<_> = g.neighbors_of("hub").iter().map(|(d, _)| *d).collect();
        assert_eq!(dirs, vec![Down, Up]);
    }

    #[test]
    fn exit_is_location_without_directions() {
        let mut g = MazeGraph::new();
        g.add_location(&view("end", &[]));
        assert!(g.location("end").unwrap().is_exit());
    }
}
