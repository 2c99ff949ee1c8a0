//! Sliding-tile puzzle solver.
//!
//! This crate provides:
//! - An immutable N×N board with its move model and the Manhattan heuristic
//! - A generator of shuffled boards that are solvable by construction
//! - A best-first search with a binary-heap frontier and an explored set
//! - A background runner that reports the result through a channel

pub mod cli;
pub mod error;
pub mod generator;
pub mod puzzle;
pub mod search;
pub mod worker;

pub use error::{AbortReason, Error, Result};
pub use generator::{generate, generate_with_rng};
pub use puzzle::{BoardState, Move, Position};
pub use search::{solve, CancellationToken, SearchConfig, SearchStats, Solution, Solver};
pub use worker::{spawn_solve, SolveHandle};
