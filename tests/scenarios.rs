//! End-to-end scenarios through the public API.

#![allow(clippy::unwrap_used)]

use rand::{rngs::StdRng, SeedableRng};

use slider_puzzle::{
    generate, generate_with_rng, solve, spawn_solve, BoardState, Error, Position, SearchConfig,
    Solver,
};

#[test]
fn one_move_board_round_trip() {
    let goal: BoardState = serde_json::from_str("[[1,2,3],[4,5,6],[7,8,9]]").unwrap();
    assert_eq!(goal.manhattan_distance(), 0);

    // Swap the blank with tile 6.
    let shuffled = goal.result(Position::new(1, 2)).unwrap();
    assert_eq!(
        serde_json::to_string(&shuffled).unwrap(),
        "[[1,2,3],[4,5,9],[7,8,6]]"
    );
    assert_eq!(shuffled.manhattan_distance(), 2);

    let actions = solve(&shuffled).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(shuffled.result(actions[0]).unwrap(), goal);
}

#[test]
fn unshuffled_board_has_empty_solution() {
    for size in 2..=6 {
        let board = generate(size, 0).unwrap();
        assert!(solve(&board).unwrap().is_empty());
    }
}

#[test]
fn swapped_tiles_are_rejected_or_exhausted() {
    let swapped: BoardState = serde_json::from_str("[[1,2,3],[4,5,6],[8,7,9]]").unwrap();
    assert!(matches!(solve(&swapped), Err(Error::InvalidBoard { .. })));

    let solver = Solver::new(SearchConfig {
        check_parity: false,
        progress_interval: 50_000,
        ..SearchConfig::default()
    });
    match solver.solve(&swapped) {
        // Half of the 9! permutations are reachable.
        Err(Error::NoSolution { explored }) => assert_eq!(explored, 181_440),
        other => panic!("expected NoSolution, got {other:?}"),
    }
}

#[test]
fn fifteen_puzzle_from_generator() {
    // Seed 17 gives a board that is solved after a few thousand expansions.
    let board = generate_with_rng(4, 60, &mut StdRng::seed_from_u64(17)).unwrap();
    let config = SearchConfig {
        max_expansions: Some(200_000),
        ..SearchConfig::default()
    };
    let handle = spawn_solve(board.clone(), config);
    let solution = handle.wait().unwrap().unwrap();

    let end = solution
        .actions
        .iter()
        .fold(board, |state, &action| state.result(action).unwrap());
    assert!(end.is_solved());
}

#[test]
fn solution_serializes_actions_as_pairs() {
    let board: BoardState = serde_json::from_str("[[1,2],[4,3]]").unwrap();
    let solution = Solver::default().solve(&board).unwrap();
    let json = serde_json::to_value(&solution).unwrap();
    assert_eq!(json["actions"], serde_json::json!([[1, 1]]));
    assert_eq!(json["stats"]["explored"], 2);
}
