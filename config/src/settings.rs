//! Typed maze settings read from the (already merged) environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `LABYRINTH_URL` | `ws://127.0.0.1:8080` |
//! | `LABYRINTH_MAZE` | unset (URL used as is) |
//! | `LABYRINTH_CONNECT_TIMEOUT_SECS` | `10` |
//! | `LABYRINTH_MOVE_TIMEOUT_SECS` | `300`, `0` waits forever |
//! | `LABYRINTH_MAX_MOVES` | unset (no budget) |

use std::time::Duration;

use crate::LoadError;

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MOVE_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSettings {
    /// Base WebSocket URL of the maze service.
    pub url: String,
    /// Maze identifier, appended to `url` as a path segment.
    pub maze: Option<String>,
    pub connect_timeout: Duration,
    /// `None` waits for each move response indefinitely.
    pub move_timeout: Option<Duration>,
    pub max_moves: Option<u64>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            maze: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            move_timeout: Some(Duration::from_secs(DEFAULT_MOVE_TIMEOUT_SECS)),
            max_moves: None,
        }
    }
}

impl MazeSettings {
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(url) = get("LABYRINTH_URL") {
            settings.url = url.trim().to_string();
        }
        settings.maze = get("LABYRINTH_MAZE").map(|m| m.trim().to_string());
        if let Some(v) = get("LABYRINTH_CONNECT_TIMEOUT_SECS") {
            settings.connect_timeout =
                Duration::from_secs(parse_u64("LABYRINTH_CONNECT_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("LABYRINTH_MOVE_TIMEOUT_SECS") {
            settings.move_timeout = match parse_u64("LABYRINTH_MOVE_TIMEOUT_SECS", &v)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
        }
        if let Some(v) = get("LABYRINTH_MAX_MOVES") {
            settings.max_moves = Some(parse_u64("LABYRINTH_MAX_MOVES", &v)?);
        }
        Ok(settings)
    }

    /// Session URL: `url`, plus `/<maze>` when a maze id is set.
    pub fn endpoint(&self) -> String {
        match self.maze.as_deref() {
            Some(maze) => format!(
                "{}/{}",
                self.url.trim_end_matches('/'),
                maze.trim_start_matches('/')
            ),
            None => self.url.clone(),
        }
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, LoadError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| LoadError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
