//! # Labyrinth
//!
//! Explores a maze nobody has a map of. The only access is a session that reports the current
//! location and answers one `go <direction>` at a time; the explorer builds the map as it goes,
//! backtracks out of dead ends, and walks back along known corridors whenever the session turns
//! out to be somewhere else than expected.
//!
//! ## Main modules
//!
//! - [`direction`]: [`Direction`] and its fixed reversal.
//! - [`protocol`]: wire messages ([`MoveRequest`], [`LocationView`]).
//! - [`session`]: [`SessionChannel`] trait; [`WsSession`] (WebSocket), [`MemorySession`] +
//!   [`MazeFixture`] (in process).
//! - [`graph`]: [`MazeGraph`], the discovered locations and edges.
//! - [`pathfinder`]: [`shortest_path`] over the discovered graph.
//! - [`explorer`]: [`Explorer`], the depth-first state machine.
//! - [`report`]: [`RunReport`] and [`Outcome`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use labyrinth::{Explorer, ExplorerOptions, SessionOptions, WsSession};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = WsSession::connect("ws://127.0.0.1:8080/maze-1", SessionOptions::default()).await?;
//! let mut explorer = Explorer::start(session, ExplorerOptions::default()).await?;
//! let report = explorer.run().await?;
//! println!("{:?} after {} moves", report.outcome, report.moves);
//! # Ok(())
//! # }
//! ```

pub mod direction;
pub mod explorer;
pub mod graph;
pub mod pathfinder;
pub mod protocol;
pub mod report;
pub mod session;

pub use direction::{Direction, UnknownDirection};
pub use explorer::{
    Action, ExploreError, Explorer, ExplorerOptions, Frame, Phase, SessionState, Step,
};
pub use graph::{Location, MazeGraph};
pub use pathfinder::{shortest_path, NoPath};
pub use protocol::{LocationView, MoveRequest};
pub use report::{Outcome, RunReport};
pub use session::{
    MazeFixture, MemorySession, SessionChannel, SessionError, SessionOptions, WsSession,
};
