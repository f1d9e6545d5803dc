//! MemorySession: plays a [`MazeFixture`] in process.
//!
//! Used by tests and by `labyrinth --demo`. Can be told to "slip" on a given move, delivering
//! the player somewhere other than where the edge leads, which is how a desynchronized
//! session looks from the explorer's side.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{SessionChannel, SessionError};
use crate::direction::Direction;
use crate::protocol::LocationView;

#[derive(Debug, Clone)]
struct Room {
    exits: Vec<(Direction, String)>,
    extra: Map<String, Value>,
}

/// A fully known maze: rooms, their exits in reported order, and optional extra payload fields.
#[derive(Debug, Clone)]
pub struct MazeFixture {
    start: String,
    rooms: HashMap<String, Room>,
}

impl MazeFixture {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            rooms: HashMap::new(),
        }
    }

    /// Adds (or replaces) a room. `exits` order is the order the session reports directions in;
    /// an empty list makes the room an exit.
    pub fn room(mut self, id: impl Into<String>, exits: &[(Direction, &str)]) -> Self {
        let exits = exits
            .iter()
            .map(|(d, to)| (*d, (*to).to_string()))
            .collect();
        self.rooms.insert(
            id.into(),
            Room {
                exits,
                extra: Map::new(),
            },
        );
        self
    }

    /// Adds a descriptive field to an existing room's messages.
    pub fn describe(mut self, id: &str, key: &str, value: Value) -> Self {
        if let Some(room) = self.rooms.get_mut(id) {
            room.extra.insert(key.to_string(), value);
        }
        self
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Destination of `direction` from room `id`, if that exit exists.
    pub fn exit_of(&self, id: &str, direction: Direction) -> Option<&str> {
        self.rooms
            .get(id)?
            .exits
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, to)| to.as_str())
    }

    /// The message the session would send for room `id`.
    pub fn view(&self, id: &str) -> Result<LocationView, SessionError> {
        let room = self
            .rooms
            .get(id)
            .ok_or_else(|| SessionError::Protocol(format!("fixture has no room {}", id)))?;
        let mut payload = room.extra.clone();
        payload.insert("id".to_string(), Value::String(id.to_string()));
        let directions: Vec<Value> = room
            .exits
            .iter()
            .map(|(d, _)| Value::String(d.as_str().to_string()))
            .collect();
        payload.insert("availableDirections".to_string(), Value::Array(directions));
        LocationView::from_value(Value::Object(payload))
    }

    /// Small maze with a loop, a dead end and one exit; used by `labyrinth --demo`.
    ///
    /// ```text
    ///  start --- hall --- closet
    ///    |        |
    ///  cellar --- well
    ///             |
    ///            gate (exit)
    /// ```
    pub fn demo() -> Self {
        use Direction::*;
        MazeFixture::new("start")
            .room("start", &[(Right, "hall"), (Down, "cellar")])
            .room("hall", &[(Left, "start"), (Right, "closet"), (Down, "well")])
            .room("closet", &[(Left, "hall")])
            .room("well", &[(Up, "hall"), (Left, "cellar"), (Down, "gate")])
            .room("cellar", &[(Up, "start"), (Right, "well")])
            .room("gate", &[])
            .describe("start", "title", Value::String("Entrance".to_string()))
            .describe("gate", "title", Value::String("The Gate".to_string()))
    }
}

/// In-process session over a [`MazeFixture`].
#[derive(Debug)]
pub struct MemorySession {
    maze: MazeFixture,
    current: Option<String>,
    served: u64,
    log: Vec<Direction>,
    slips: HashMap<u64, String>,
}

impl MemorySession {
    pub fn new(maze: MazeFixture) -> Self {
        Self {
            maze,
            current: None,
            served: 0,
            log: Vec::new(),
            slips: HashMap::new(),
        }
    }

    /// On the `nth` move (1-based), deliver the player to `to` instead of the edge destination.
    pub fn slip_on_move(mut self, nth: u64, to: impl Into<String>) -> Self {
        self.slips.insert(nth, to.into());
        self
    }

    /// Number of moves answered so far.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Every direction received, in order.
    pub fn log(&self) -> &[Direction] {
        &self.log
    }

    /// Where the player actually is.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[async_trait]
impl SessionChannel for MemorySession {
    async fn open(&mut self) -> Result<LocationView, SessionError> {
        if self.current.is_some() {
            return Err(SessionError::Protocol(
                "start location already received".to_string(),
            ));
        }
        let start = self.maze.view(self.maze.start())?;
        self.current = Some(start.id.clone());
        Ok(start)
    }

    async fn move_to(&mut self, direction: Direction) -> Result<LocationView, SessionError> {
        let here = self.current.as_deref().ok_or(SessionError::NotOpen)?;
        let to = self
            .maze
            .exit_of(here, direction)
            .ok_or_else(|| SessionError::InvalidMove {
                location: here.to_string(),
                direction,
            })?
            .to_string();

        self.served += 1;
        self.log.push(direction);
        let to = self.slips.remove(&self.served).unwrap_or(to);
        let view = self.maze.view(&to)?;
        self.current = Some(to);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn corridor() -> MazeFixture {
        MazeFixture::new("a")
            .room("a", &[(Right, "b")])
            .room("b", &[(Left, "a"), (Right, "c")])
            .room("c", &[])
    }

    #[tokio::test]
    async fn open_then_move_follows_exits() {
        let mut s = MemorySession::new(corridor());
        let start = s.open().await.unwrap();
        assert_eq!(start.id, "a");
        assert_eq!(start.available_directions, vec![Right]);
        let b = s.move_to(Right).await.unwrap();
        assert_eq!(b.id, "b");
        let c = s.move_to(Right).await.unwrap();
        assert!(c.is_exit());
        assert_eq!(s.served(), 2);
        assert_eq!(s.log(), &[Right, Right]);
    }

    #[tokio::test]
    async fn move_before_open_is_rejected() {
        let mut s = MemorySession::new(corridor());
        assert!(matches!(s.move_to(Right).await, Err(SessionError::NotOpen)));
    }

    #[tokio::test]
    async fn unavailable_direction_is_invalid_move() {
        let mut s = MemorySession::new(corridor());
        s.open().await.unwrap();
        let err = s.move_to(Up).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidMove { direction: Up, .. }));
        assert!(err.is_protocol());
        assert_eq!(s.served(), 0);
    }

    #[tokio::test]
    async fn slip_delivers_elsewhere() {
        let mut s = MemorySession::new(corridor()).slip_on_move(1, "c");
        s.open().await.unwrap();
        let v = s.move_to(Right).await.unwrap();
        assert_eq!(v.id, "c");
        assert_eq!(s.current(), Some("c"));
    }

    #[test]
    fn view_carries_description_fields() {
        let maze = corridor().describe("b", "title", Value::String("Bend".to_string()));
        let v = maze.view("b").unwrap();
        assert_eq!(v.payload["title"], "Bend");
        assert_eq!(v.payload["availableDirections"][1], "right");
        assert!(maze.view("nope").is_err());
    }

    #[test]
    fn demo_maze_is_consistent() {
        let maze = MazeFixture::demo();
        assert_eq!(maze.len(), 6);
        for id in ["start", "hall", "closet", "well", "cellar", "gate"] {
            let v = maze.view(id).unwrap();
            for d in v.available_directions {
                let to = maze.exit_of(id, d).unwrap();
                assert!(maze.view(to).is_ok(), "{} -> {} dangles", id, d);
            }
        }
    }
}
