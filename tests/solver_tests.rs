use rand::{rngs::SmallRng, SeedableRng};
use ships::{
    generate, place_fleet, solve, solve_grid, Cell, Difficulty, GameParams, Grid, Orientation,
    Puzzle, PuzzleError, ShipPlacement, SolveOutcome, MIN_GRID_FLEET,
};

fn line(len: usize, set: &[(usize, usize)]) -> Vec<Option<usize>> {
    let mut sums = vec![Some(0); len];
    for &(i, n) in set {
        sums[i] = Some(n);
    }
    sums
}

fn two_singles() -> Puzzle {
    Puzzle::new(
        7,
        7,
        vec![1, 1],
        line(7, &[(0, 1), (2, 1)]),
        line(7, &[(0, 1), (2, 1)]),
        Grid::new(7, 7),
    )
    .unwrap()
}

#[test]
fn test_single_ship_unique() {
    let puzzle = Puzzle::new(
        7,
        7,
        vec![1],
        line(7, &[(3, 1)]),
        line(7, &[(4, 1)]),
        Grid::new(7, 7),
    )
    .unwrap();
    let solution = solve(&puzzle, None);
    match solution.outcome {
        SolveOutcome::Unique(p) => {
            assert_eq!(
                p.ships,
                vec![ShipPlacement::new(1, Orientation::Horizontal, 3, 4)]
            );
        }
        other => panic!("expected a unique solution, got {:?}", other),
    }

    let grid = solve_grid(&puzzle).unwrap();
    assert_eq!(grid.get(3, 4), Cell::Single);
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_ambiguous() {
    let solution = solve(&two_singles(), None);
    match &solution.outcome {
        SolveOutcome::Ambiguous(a, b) => assert!(!a.same_layout(b, 7, 7)),
        other => panic!("expected two solutions, got {:?}", other),
    }
    assert_eq!(solution.into_result(), Err(PuzzleError::Ambiguous));
}

#[test]
fn test_disclosed_water_disambiguates() {
    let mut disclosed = Grid::new(7, 7);
    disclosed.set(0, 0, Cell::Vacant);
    let puzzle = two_singles().with_disclosed(disclosed).unwrap();
    let placement = solve(&puzzle, None).into_result().unwrap();
    let grid = placement.to_grid(7, 7);
    assert_eq!(grid.get(0, 2), Cell::Single);
    assert_eq!(grid.get(2, 0), Cell::Single);
}

#[test]
fn test_infeasible_sums() {
    let puzzle = Puzzle::new(
        7,
        7,
        vec![2],
        line(7, &[(0, 1)]),
        line(7, &[(0, 1)]),
        Grid::new(7, 7),
    )
    .unwrap();
    let solution = solve(&puzzle, None);
    assert_eq!(solution.outcome, SolveOutcome::Infeasible);
    assert_eq!(solve_grid(&puzzle), Err(PuzzleError::Infeasible));
}

#[test]
fn test_infeasible_disclosure() {
    let mut disclosed = Grid::new(7, 7);
    disclosed.set(3, 4, Cell::Vacant);
    let puzzle = Puzzle::new(
        7,
        7,
        vec![1],
        line(7, &[(3, 1)]),
        line(7, &[(4, 1)]),
        disclosed,
    )
    .unwrap();
    assert_eq!(solve(&puzzle, None).outcome, SolveOutcome::Infeasible);
}

#[test]
fn test_budget() {
    let puzzle = two_singles();
    let solution = solve(&puzzle, Some(1));
    assert_eq!(solution.outcome, SolveOutcome::BudgetExceeded);
    assert_eq!(solution.into_result(), Err(PuzzleError::BudgetExceeded));

    // Zero means no limit.
    assert!(matches!(
        solve(&puzzle, Some(0)).outcome,
        SolveOutcome::Ambiguous(..)
    ));
}

#[test]
fn test_refined_end_with_hidden_sums() {
    let mut disclosed = Grid::new(7, 7);
    disclosed.set(3, 3, Cell::North);
    let puzzle = Puzzle::new(7, 7, vec![2], vec![None; 7], vec![None; 7], disclosed).unwrap();
    let placement = solve(&puzzle, None).into_result().unwrap();
    assert_eq!(
        placement.ships,
        vec![ShipPlacement::new(2, Orientation::Vertical, 3, 3)]
    );
}

#[test]
fn test_refined_label_rules_out_orientation() {
    // A west end forces its hull to the east.
    let mut disclosed = Grid::new(7, 7);
    disclosed.set(2, 2, Cell::West);
    let puzzle = Puzzle::new(
        7,
        7,
        vec![2],
        vec![None; 7],
        vec![None; 7],
        disclosed,
    )
    .unwrap();
    let placement = solve(&puzzle, None).into_result().unwrap();
    assert_eq!(
        placement.ships,
        vec![ShipPlacement::new(2, Orientation::Horizontal, 2, 2)]
    );
}

#[test]
fn test_smallest_fleet_from_sums_alone() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let fleet = place_fleet(7, 7, MIN_GRID_FLEET.to_vec(), &mut rng);
    let rows = fleet.placement.row_sums(7);
    let cols = fleet.placement.col_sums(7);
    let puzzle = Puzzle::new(
        7,
        7,
        fleet.ships.clone(),
        rows.iter().copied().map(Some).collect(),
        cols.iter().copied().map(Some).collect(),
        Grid::new(7, 7),
    )
    .unwrap();

    let found = match solve(&puzzle, None).outcome {
        SolveOutcome::Unique(p) => p,
        SolveOutcome::Ambiguous(p, _) => p,
        other => panic!("expected a placement, got {:?}", other),
    };
    assert_eq!(found.row_sums(7), rows);
    assert_eq!(found.col_sums(7), cols);
    let lengths: Vec<usize> = found.ships.iter().map(|s| s.length).collect();
    assert_eq!(lengths, fleet.ships);
}

#[test]
fn test_generated_puzzles_have_their_truth_as_solution() {
    for (seed, difficulty) in [
        (1, Difficulty::Basic),
        (2, Difficulty::Basic),
        (3, Difficulty::Intermediate),
    ] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let params = GameParams::new(7, 7, difficulty);
        let generated = generate(&params, &mut rng).unwrap();
        let solution = solve(&generated.puzzle, None);
        match solution.outcome {
            SolveOutcome::Unique(p) => assert!(p.same_layout(&generated.solution, 7, 7)),
            other => panic!("seed {}: expected a unique solution, got {:?}", seed, other),
        }
    }
}
