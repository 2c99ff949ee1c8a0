//! Best-first (A*-shaped) graph search over puzzle boards.
//!
//! A [`Search`] owns its frontier, explored set and node arena. It moves from
//! `Running` to either `Solved` or `Failed`, one expansion per call to
//! [`Search::step`]. [`Solver`] wraps a search with its configuration and runs
//! it to completion.

pub mod frontier;
pub mod node;

use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AbortReason, Error, Result};
use crate::puzzle::{BoardState, Position};

pub use frontier::Frontier;
pub use node::{reconstruct, Node, NodeArena, NodeId};

const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Tuning knobs for a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Abort once this many boards have been expanded.
    pub max_expansions: Option<usize>,
    /// Reject unsolvable boards before searching.
    pub check_parity: bool,
    /// Log progress every this many expansions. Zero disables it.
    pub progress_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            check_parity: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Shared flag used to stop a running search from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters collected during a search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Boards removed from the frontier.
    pub explored: usize,
    /// Nodes added to the frontier, the root included.
    pub generated: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// Actions solving a board, first move first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub actions: Vec<Position>,
    pub stats: SearchStats,
}

/// Outcome of a single search step.
#[derive(Debug)]
pub enum Step {
    Running,
    Solved(Solution),
    Failed(Error),
}

/// Terminal state of a search, kept so later steps repeat it.
#[derive(Debug, Clone)]
enum Outcome {
    Solved(Solution),
    Exhausted,
    Aborted(AbortReason),
    InvalidAction(Position),
}

impl Outcome {
    fn to_step(&self, explored: usize) -> Step {
        match self {
            Outcome::Solved(solution) => Step::Solved(solution.clone()),
            Outcome::Exhausted => Step::Failed(Error::NoSolution { explored }),
            Outcome::Aborted(reason) => Step::Failed(Error::SearchAborted {
                explored,
                reason: *reason,
            }),
            Outcome::InvalidAction(pos) => Step::Failed(Error::InvalidAction {
                row: pos.row,
                col: pos.col,
            }),
        }
    }
}

/// One run of the search.
pub struct Search {
    config: SearchConfig,
    cancel: Option<CancellationToken>,
    frontier: Frontier,
    explored: HashSet<BoardState>,
    arena: NodeArena,
    stats: SearchStats,
    outcome: Option<Outcome>,
}

impl Search {
    /// Start a search from `board`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBoard`] when parity checking is enabled and the goal is
    /// unreachable from `board`.
    pub fn new(board: BoardState, config: SearchConfig) -> Result<Self> {
        if config.check_parity && !board.is_solvable() {
            return Err(Error::invalid_board(
                "tile permutation parity makes the goal unreachable",
            ));
        }

        let mut frontier = Frontier::new();
        frontier.add(Node::root(board));
        Ok(Self {
            config,
            cancel: None,
            frontier,
            explored: HashSet::new(),
            arena: NodeArena::new(),
            stats: SearchStats {
                explored: 0,
                generated: 1,
                max_frontier: 1,
            },
            outcome: None,
        })
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Whether the search reached `Solved` or `Failed`.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Expand at most one node.
    ///
    /// Once the search is solved or failed, every further call returns the
    /// same outcome without touching the frontier.
    pub fn step(&mut self) -> Step {
        if self.outcome.is_none() {
            self.outcome = self.expand_next();
        }
        match &self.outcome {
            None => Step::Running,
            Some(outcome) => outcome.to_step(self.stats.explored),
        }
    }

    fn expand_next(&mut self) -> Option<Outcome> {
        if let Some(reason) = self.abort_reason() {
            warn!(
                "search aborted after {} expansions: {reason}",
                self.stats.explored
            );
            return Some(Outcome::Aborted(reason));
        }

        let Ok(current) = self.frontier.remove() else {
            return Some(Outcome::Exhausted);
        };
        self.stats.explored += 1;
        self.log_progress(&current);

        if current.h == 0 {
            info!(
                "solved in {} moves after exploring {} boards",
                current.g, self.stats.explored
            );
            return Some(Outcome::Solved(Solution {
                actions: reconstruct(&current, &self.arena),
                stats: self.stats,
            }));
        }

        self.explored.insert(current.state.clone());
        let actions = current.state.actions();
        let g = current.g;
        let state = current.state.clone();
        let id = self.arena.push(current);

        for action in actions {
            let Ok(child_state) = state.result(action) else {
                return Some(Outcome::InvalidAction(action));
            };
            if self.frontier.contains_state(&child_state) || self.explored.contains(&child_state) {
                continue;
            }
            if self.frontier.add(Node::child(id, g, action, child_state)) {
                self.stats.generated += 1;
            }
        }
        self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());

        None
    }

    /// Step until the search is solved or fails.
    pub fn run(mut self) -> Result<Solution> {
        loop {
            match self.step() {
                Step::Running => {}
                Step::Solved(solution) => return Ok(solution),
                Step::Failed(e) => return Err(e),
            }
        }
    }

    fn abort_reason(&self) -> Option<AbortReason> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(AbortReason::Cancelled);
        }
        match self.config.max_expansions {
            Some(limit) if self.stats.explored >= limit => Some(AbortReason::ExpansionLimit(limit)),
            _ => None,
        }
    }

    fn log_progress(&self, current: &Node) {
        let interval = self.config.progress_interval;
        if interval > 0 && self.stats.explored % interval == 0 {
            debug!(
                "explored {} boards, frontier {} (g={}, h={})",
                self.stats.explored,
                self.frontier.len(),
                current.g,
                current.h
            );
        }
    }
}

/// Runs searches with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SearchConfig,
    cancel: Option<CancellationToken>,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Search for a move sequence that turns `board` into the goal.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBoard`] for a board failing the parity check,
    /// [`Error::NoSolution`] when the reachable boards are exhausted, and
    /// [`Error::SearchAborted`] on cancellation or when the expansion cap is hit.
    pub fn solve(&self, board: &BoardState) -> Result<Solution> {
        let mut search = Search::new(board.clone(), self.config)?;
        if let Some(token) = &self.cancel {
            search = search.with_cancellation(token.clone());
        }
        search.run()
    }
}

/// Solve `board` with the default configuration and return the actions.
pub fn solve(board: &BoardState) -> Result<Vec<Position>> {
    Solver::default().solve(board).map(|solution| solution.actions)
}
