//! Explorer: depth-first exploration of an unknown maze through a [`SessionChannel`].
//!
//! Keeps an explicit stack of [`Frame`]s (the discovery tree path from the start to the
//! current location) and a [`MazeGraph`] of everything seen. Each [`Explorer::step`]:
//!
//! 1. **Reconcile**: if the session is not where the top frame says, replay the shortest
//!    known path to it (no path is fatal).
//! 2. **Terminal check**: a top location without directions is the exit.
//! 3. **Frontier**: take the first reported direction with no recorded neighbor. A new
//!    location is pushed; a known one (a loop) gets its edge recorded and is left again at
//!    once through the reverse direction. With nothing left to try, pop and walk back to the
//!    parent; popping the root means the maze is exhausted.
//!
//! Only one move is ever in flight; the explorer awaits every response before deciding.

mod error;
mod frame;
mod state;

pub use error::ExploreError;
pub use frame::Frame;
pub use state::{Action, ExplorerOptions, Phase, SessionState, Step};

use tracing::{debug, info, warn, Instrument};

use crate::direction::Direction;
use crate::graph::MazeGraph;
use crate::pathfinder::shortest_path;
use crate::protocol::LocationView;
use crate::report::{Outcome, RunReport};
use crate::session::SessionChannel;

/// Location reported in errors raised before the session delivered its start.
const UNOPENED: &str = "(not opened)";

pub struct Explorer<S> {
    session: S,
    state: SessionState,
    options: ExplorerOptions,
}

impl<S: SessionChannel> Explorer<S> {
    /// Opens the session, registers the start location and pushes the root frame.
    pub async fn start(mut session: S, options: ExplorerOptions) -> Result<Self, ExploreError> {
        let start = session
            .open()
            .await
            .map_err(|e| ExploreError::session(e, UNOPENED, 0))?;
        info!(start = %start.id, directions = start.available_directions.len(), "maze session opened");

        let mut graph = MazeGraph::new();
        graph.add_location(&start);
        let state = SessionState::new(graph, start.id, start.payload);
        Ok(Self {
            session,
            state,
            options,
        })
    }

    /// Steps until the run is solved or exhausted.
    pub async fn run(&mut self) -> Result<RunReport, ExploreError> {
        let span = tracing::info_span!("explore", start = %self.state.start_key);
        async {
            loop {
                let step = self.step().await?;
                if step.phase.is_terminal() {
                    break;
                }
            }
            let report = self.report();
            info!(
                outcome = ?report.outcome,
                moves = report.moves,
                locations = report.locations,
                "exploration finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Performs one reconcile / terminal-check / frontier decision.
    pub async fn step(&mut self) -> Result<Step, ExploreError> {
        if self.state.phase.is_terminal() {
            return Ok(self.finish(Action::Finish));
        }
        let top = match self.state.top() {
            Some(frame) => frame.key.clone(),
            None => {
                self.state.phase = Phase::Exhausted;
                return Ok(self.finish(Action::Finish));
            }
        };

        if self.state.position != top {
            self.state.phase = Phase::Recovering;
            let path = self.recover(&top).await?;
            self.state.phase = Phase::Exploring;
            return Ok(self.finish(Action::Recover { path }));
        }

        let (is_exit, frontier) = match self.state.graph.location(&top) {
            Some(location) => (location.is_exit(), location.first_unexplored()),
            None => return Err(self.inconsistent(&top, "stack frame is not in the graph")),
        };

        if is_exit {
            self.state.phase = Phase::Solved;
            info!(exit = %top, moves = self.state.moves, "exit reached");
            return Ok(self.finish(Action::Finish));
        }

        match frontier {
            Some(direction) => self.explore(&top, direction).await,
            None => self.backtrack().await,
        }
    }

    /// Tries one unexplored edge of the top location.
    async fn explore(&mut self, top: &str, direction: Direction) -> Result<Step, ExploreError> {
        let (view, discovered) = self.travel(direction).await?;
        if discovered {
            self.state
                .stack
                .push(Frame::child(view.id.clone(), top, direction));
            debug!(depth = self.state.stack.len(), to = %view.id, "descend");
            return Ok(self.finish(Action::Descend {
                direction,
                to: view.id,
            }));
        }

        // Known location: a loop. The stack only follows the discovery tree, so step back out.
        debug!(%direction, to = %view.id, "merged into known location; reversing");
        self.travel(direction.reverse()).await?;
        Ok(self.finish(Action::Merge {
            direction,
            to: view.id,
        }))
    }

    async fn backtrack(&mut self) -> Result<Step, ExploreError> {
        let Some(frame) = self.state.stack.pop() else {
            self.state.phase = Phase::Exhausted;
            return Ok(self.finish(Action::Finish));
        };
        if self.state.stack.is_empty() {
            self.state.phase = Phase::Exhausted;
            info!(
                locations = self.state.graph.len(),
                moves = self.state.moves,
                "maze exhausted without reaching an exit"
            );
            return Ok(self.finish(Action::Pop { key: frame.key }));
        }
        match frame.backtrack_direction() {
            Some(direction) => {
                let (view, _) = self.travel(direction).await?;
                Ok(self.finish(Action::Backtrack {
                    direction,
                    to: view.id,
                }))
            }
            None => Err(self.inconsistent(&frame.key, "non-root frame has no entry direction")),
        }
    }

    fn inconsistent(&self, location: &str, reason: &str) -> ExploreError {
        ExploreError::Inconsistent {
            location: location.to_string(),
            moves: self.state.moves,
            reason: reason.to_string(),
        }
    }

    /// Replays the shortest known path from the reported position to `target`.
    async fn recover(&mut self, target: &str) -> Result<Vec<Direction>, ExploreError> {
        let actual = self.state.position.clone();
        warn!(
            believed = %target,
            actual = %actual,
            moves = self.state.moves,
            "session position diverged; recovering"
        );
        let path = shortest_path(&self.state.graph, &actual, target).map_err(|_| {
            ExploreError::Desynchronized {
                believed: target.to_string(),
                actual: actual.clone(),
                moves: self.state.moves,
            }
        })?;
        for direction in &path {
            self.travel(*direction).await?;
        }
        debug!(steps = path.len(), position = %self.state.position, "recovery replayed");
        Ok(path)
    }

    /// Issues one move and folds the response into the graph.
    ///
    /// Returns the reported location and whether it was seen for the first time. The edge is
    /// recorded only if the origin has no neighbor in that direction yet.
    async fn travel(&mut self, direction: Direction) -> Result<(LocationView, bool), ExploreError> {
        if let Some(limit) = self.options.max_moves {
            if self.state.moves >= limit {
                return Err(ExploreError::MoveBudgetExceeded {
                    limit,
                    location: self.state.position.clone(),
                });
            }
        }

        let from = self.state.position.clone();
        let view = self
            .session
            .move_to(direction)
            .await
            .map_err(|e| ExploreError::session(e, &from, self.state.moves))?;
        self.state.moves += 1;
        self.state.path.push(direction);

        let discovered = self.state.graph.add_location(&view);
        if self.state.graph.neighbor(&from, direction).is_none() {
            self.state.graph.record_edge(&from, direction, &view.id);
        }
        debug!(
            moves = self.state.moves,
            %direction,
            from = %from,
            to = %view.id,
            discovered,
            "move"
        );
        self.state.position = view.id.clone();
        self.state.last_payload = view.payload.clone();
        Ok((view, discovered))
    }

    fn finish(&self, action: Action) -> Step {
        Step {
            action,
            phase: self.state.phase,
        }
    }

    /// Result of a finished run; `None` while still exploring.
    pub fn try_report(&self) -> Option<RunReport> {
        self.state.phase.is_terminal().then(|| self.report())
    }

    fn report(&self) -> RunReport {
        let outcome = if self.state.phase == Phase::Solved {
            Outcome::Solved
        } else {
            Outcome::Exhausted
        };
        let end = match (outcome, self.state.graph.location(&self.state.position)) {
            (Outcome::Solved, Some(exit)) => exit.payload.clone(),
            _ => self.state.last_payload.clone(),
        };
        RunReport {
            outcome,
            start: self.state.start_payload.clone(),
            end,
            moves: self.state.moves,
            locations: self.state.graph.len(),
            path: self.state.path.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn stack(&self) -> &[Frame] {
        &self.state.stack
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.state.graph
    }

    /// Location the session last reported.
    pub fn position(&self) -> &str {
        &self.state.position
    }

    pub fn moves(&self) -> u64 {
        self.state.moves
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }
}
