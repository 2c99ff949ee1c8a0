//! Command-line front end: generate or load a board, solve it, print the moves.

use clap::Parser;
use crossterm::style::Stylize;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::generator::{generate, generate_with_rng};
use crate::puzzle::{BoardState, Move, Position};
use crate::search::{SearchConfig, Solution, Solver};

/// Solve N×N sliding-tile puzzles.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Number of rows and columns of a generated board
    #[arg(short, long, default_value_t = 4)]
    pub size: usize,

    /// Number of random slides applied to the goal board
    #[arg(short = 'm', long, default_value_t = 40)]
    pub shuffle: usize,

    /// Seed for reproducible board generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Board to solve as JSON rows, blank = N², e.g. '[[1,2],[4,3]]'
    #[arg(short, long, conflicts_with = "input")]
    pub board: Option<String>,

    /// File holding the board to solve as JSON rows
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Give up after expanding this many boards
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Skip the solvability check and let the search exhaust the state space
    #[arg(long, default_value_t = false)]
    pub no_parity_check: bool,

    /// Print the board and the solution as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only print the number of moves
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_expansions: self.max_expansions,
            check_parity: !self.no_parity_check,
            ..SearchConfig::default()
        }
    }

    /// Board given on the command line or in a file, otherwise a new one.
    pub fn starting_board(&self) -> Result<BoardState> {
        if let Some(json) = &self.board {
            return Ok(serde_json::from_str(json)?);
        }
        if let Some(path) = &self.input {
            let text = fs::read_to_string(path).map_err(|source| Error::Io {
                operation: format!("read board from {}", path.display()),
                source,
            })?;
            return Ok(serde_json::from_str(&text)?);
        }
        match self.seed {
            Some(seed) => {
                generate_with_rng(self.size, self.shuffle, &mut StdRng::seed_from_u64(seed))
            }
            None => generate(self.size, self.shuffle),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    board: &'a BoardState,
    moves: Vec<Move>,
    #[serde(flatten)]
    solution: &'a Solution,
}

/// Direction of every action when replayed from `board`.
pub fn moves_for(board: &BoardState, actions: &[Position]) -> Result<Vec<Move>> {
    let mut state = board.clone();
    let mut moves = Vec::with_capacity(actions.len());
    for &action in actions {
        let movement =
            Move::from_action(state.locate_blank(), action).ok_or(Error::InvalidAction {
                row: action.row,
                col: action.col,
            })?;
        state = state.result(action)?;
        moves.push(movement);
    }
    Ok(moves)
}

/// Board rendering with the blank dimmed and `moved` highlighted.
struct StyledBoard<'a> {
    board: &'a BoardState,
    moved: Option<Position>,
}

impl fmt::Display for StyledBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blank = self.board.blank_value();
        self.board.write_grid(f, |pos, value, text| {
            if value == blank {
                format!("{:>1$}", "·", text.len()).dark_grey().to_string()
            } else if self.moved == Some(pos) {
                text.reverse().to_string()
            } else {
                text
            }
        })
    }
}

/// Execute the command described by `args`.
pub fn run(args: &Args) -> Result<()> {
    let board = args.starting_board()?;
    debug!("starting board: {}", serde_json::to_string(&board)?);

    let solver = Solver::new(args.search_config());
    let solution = solver.solve(&board)?;
    let moves = moves_for(&board, &solution.actions)?;
    info!(
        "explored {} boards, generated {}, peak frontier {}",
        solution.stats.explored, solution.stats.generated, solution.stats.max_frontier
    );

    if args.json {
        let report = Report {
            board: &board,
            moves,
            solution: &solution,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.quiet {
        println!("{}", solution.actions.len());
        return Ok(());
    }

    println!("Shuffled Puzzle:\n{}", StyledBoard { board: &board, moved: None });
    println!("Found solution with: {} moves", solution.actions.len());

    let mut state = board;
    for (&action, movement) in solution.actions.iter().zip(moves) {
        let blank = state.locate_blank();
        state = state.result(action)?;
        println!("{}\n{}", movement, StyledBoard { board: &state, moved: Some(blank) });
    }
    Ok(())
}
