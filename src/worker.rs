//! Run a search on its own thread.
//!
//! Interactive callers must not block their event thread on a search, whose
//! duration grows quickly with the board size. [`spawn_solve`] moves the work
//! to a new thread and hands the result back through a channel that can be
//! awaited or read with `recv_blocking`.

use async_channel::Receiver;
use log::debug;
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::puzzle::BoardState;
use crate::search::{CancellationToken, SearchConfig, Solution, Solver};

/// Handle to a search running in the background.
#[derive(Debug)]
pub struct SolveHandle {
    pub receiver: Receiver<Result<Solution>>,
    cancel: CancellationToken,
    thread: JoinHandle<()>,
}

impl SolveHandle {
    /// Ask the search to stop. It ends with `SearchAborted`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Block until the search finishes and return its result.
    pub fn wait(self) -> Option<Result<Solution>> {
        let result = self.receiver.recv_blocking().ok();
        // The worker sent its result already, so joining does not block for long.
        let _ = self.thread.join();
        result
    }
}

/// Start solving `board` on a new thread.
pub fn spawn_solve(board: BoardState, config: SearchConfig) -> SolveHandle {
    let (sender, receiver) = async_channel::bounded::<Result<Solution>>(1);
    let cancel = CancellationToken::new();
    let solver = Solver::new(config).with_cancellation(cancel.clone());

    let thread = thread::spawn(move || {
        let result = solver.solve(&board);
        if sender.send_blocking(result).is_err() {
            debug!("search result dropped: receiver closed");
        }
    });

    SolveHandle {
        receiver,
        cancel,
        thread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AbortReason, Error};
    use crate::generator::generate_with_rng;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn background_solve_delivers_solution() {
        let board = generate_with_rng(3, 20, &mut StdRng::seed_from_u64(5)).unwrap();
        let handle = spawn_solve(board.clone(), SearchConfig::default());
        let solution = handle.wait().unwrap().unwrap();

        let end = solution
            .actions
            .iter()
            .fold(board, |state, &action| state.result(action).unwrap());
        assert!(end.is_solved());
    }

    #[test]
    fn cancelled_handle_ends_search() {
        let board = generate_with_rng(4, 60, &mut StdRng::seed_from_u64(17)).unwrap();
        let config = SearchConfig {
            max_expansions: Some(100_000),
            ..SearchConfig::default()
        };
        let handle = spawn_solve(board, config);
        handle.cancel();
        assert!(handle.token().is_cancelled());
        // Depending on timing the search either finished or was aborted.
        match handle.wait().unwrap() {
            Ok(_)
            | Err(Error::SearchAborted {
                reason: AbortReason::Cancelled,
                ..
            }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
