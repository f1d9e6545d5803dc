//! Session channel: the one-request-at-a-time link to a maze session.
//!
//! Two implementations:
//! - **WsSession**: talks to a remote maze over WebSocket.
//! - **MemorySession**: plays a [`MazeFixture`] in process (tests, `--demo`).
//!
//! The explorer depends only on [`SessionChannel`]. `move_to` takes `&mut self`, so a second
//! move cannot be issued while one is still awaiting its response.

mod error;
mod memory;
mod ws;

pub use error::SessionError;
pub use memory::{MazeFixture, MemorySession};
pub use ws::{SessionOptions, WsSession};

use async_trait::async_trait;

use crate::direction::Direction;
use crate::protocol::LocationView;

#[async_trait]
pub trait SessionChannel: Send {
    /// Returns the starting location pushed by the session at connection time.
    ///
    /// Called once, before any move.
    async fn open(&mut self) -> Result<LocationView, SessionError>;

    /// Sends one move and waits for its single response.
    async fn move_to(&mut self, direction: Direction) -> Result<LocationView, SessionError>;
}
