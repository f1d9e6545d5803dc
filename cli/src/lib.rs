//! Library side of the `labyrinth` binary.
//!
//! [`Overrides`] folds command-line flags over [`MazeSettings`]; [`run_remote`] and
//! [`run_demo`] drive one exploration to completion; [`output`] renders what came back.

pub mod logging;
pub mod output;

use std::time::Duration;

use config::{LoadError, MazeSettings};
use labyrinth::{
    ExploreError, Explorer, ExplorerOptions, MazeFixture, MazeGraph, MemorySession, Outcome,
    RunReport, SessionChannel, SessionError, SessionOptions, WsSession,
};
use tracing::info;

pub use output::{render_text, to_json, write_output};

/// Exit status for a run that mapped the whole maze without finding an exit.
pub const EXIT_EXHAUSTED: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] LoadError),
    #[error("session: {0}")]
    Session(#[from] SessionError),
    #[error(transparent)]
    Explore(#[from] ExploreError),
    #[error("output: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Values given on the command line; each one set replaces the environment setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub url: Option<String>,
    pub maze: Option<String>,
    /// Seconds; `0` waits forever.
    pub move_timeout: Option<u64>,
    pub max_moves: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, mut settings: MazeSettings) -> MazeSettings {
        if let Some(url) = &self.url {
            settings.url = url.clone();
        }
        if let Some(maze) = &self.maze {
            settings.maze = Some(maze.clone());
        }
        if let Some(secs) = self.move_timeout {
            settings.move_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(limit) = self.max_moves {
            settings.max_moves = Some(limit);
        }
        settings
    }
}

/// A completed run and the map it produced.
#[derive(Debug, Clone)]
pub struct Finished {
    pub report: RunReport,
    pub graph: MazeGraph,
}

impl Finished {
    /// `0` when solved, [`EXIT_EXHAUSTED`] otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.report.outcome {
            Outcome::Solved => 0,
            Outcome::Exhausted => EXIT_EXHAUSTED,
        }
    }
}

/// Runs the explorer over any session until it is solved or exhausted.
pub async fn explore<S: SessionChannel>(
    session: S,
    options: ExplorerOptions,
) -> Result<Finished, CliError> {
    let mut explorer = Explorer::start(session, options).await?;
    let report = explorer.run().await?;
    Ok(Finished {
        report,
        graph: explorer.graph().clone(),
    })
}

/// Connects to the maze service at `settings.endpoint()` and explores it.
pub async fn run_remote(settings: &MazeSettings) -> Result<Finished, CliError> {
    let endpoint = settings.endpoint();
    info!(%endpoint, "connecting to maze service");
    let session = WsSession::connect(&endpoint, session_options(settings)).await?;
    explore(session, explorer_options(settings)).await
}

/// Explores the built-in demo maze without a server.
pub async fn run_demo(settings: &MazeSettings) -> Result<Finished, CliError> {
    info!("exploring built-in demo maze");
    let session = MemorySession::new(MazeFixture::demo());
    explore(session, explorer_options(settings)).await
}

fn session_options(settings: &MazeSettings) -> SessionOptions {
    SessionOptions {
        connect_timeout: settings.connect_timeout,
        move_timeout: settings.move_timeout,
    }
}

fn explorer_options(settings: &MazeSettings) -> ExplorerOptions {
    ExplorerOptions {
        max_moves: settings.max_moves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_settings() {
        let settings = MazeSettings::default();
        assert_eq!(Overrides::default().apply(settings.clone()), settings);
    }

    #[test]
    fn overrides_replace_settings() {
        let overrides = Overrides {
            url: Some("ws://maze:9000".to_string()),
            maze: Some("m7".to_string()),
            move_timeout: Some(20),
            max_moves: Some(100),
        };
        let s = overrides.apply(MazeSettings::default());
        assert_eq!(s.endpoint(), "ws://maze:9000/m7");
        assert_eq!(s.move_timeout, Some(Duration::from_secs(20)));
        assert_eq!(s.max_moves, Some(100));
    }

    #[test]
    fn zero_move_timeout_override_waits_forever() {
        let overrides = Overrides {
            move_timeout: Some(0),
            ..Overrides::default()
        };
        assert_eq!(overrides.apply(MazeSettings::default()).move_timeout, None);
    }

    #[test]
    fn options_follow_settings() {
        let settings = MazeSettings {
            connect_timeout: Duration::from_secs(2),
            move_timeout: None,
            max_moves: Some(9),
            ..MazeSettings::default()
        };
        let session = session_options(&settings);
        assert_eq!(session.connect_timeout, Duration::from_secs(2));
        assert_eq!(session.move_timeout, None);
        assert_eq!(explorer_options(&settings).max_moves, Some(9));
    }

    #[tokio::test]
    async fn demo_run_is_solved() {
        let finished = run_demo(&MazeSettings::default()).await.unwrap();
        assert!(finished.report.success());
        assert_eq!(finished.exit_code(), 0);
        assert_eq!(finished.graph.len(), finished.report.locations);
    }

    #[tokio::test]
    async fn exhausted_run_has_non_zero_exit_code() {
        use labyrinth::Direction::{Down, Up};
        let maze = MazeFixture::new("a")
            .room("a", &[(Up, "b")])
            .room("b", &[(Down, "a")]);
        let finished = explore(MemorySession::new(maze), ExplorerOptions::default())
            .await
            .unwrap();
        assert_eq!(finished.report.outcome, Outcome::Exhausted);
        assert_eq!(finished.exit_code(), EXIT_EXHAUSTED);
    }

    #[tokio::test]
    async fn demo_run_respects_move_budget() {
        let settings = MazeSettings {
            max_moves: Some(1),
            ..MazeSettings::default()
        };
        let err = run_demo(&settings).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Explore(ExploreError::MoveBudgetExceeded { limit: 1, .. })
        ));
    }
}
