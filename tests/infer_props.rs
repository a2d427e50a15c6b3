use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use ships::{
    completed_ships, place_fleet, propagate, reconcile, refine, Cell, Grid, Placement,
    MIN_GRID_FLEET,
};

/// A random fleet layout and a grid disclosing some of its cells.
fn random_disclosure(seed: u64) -> (Grid, Grid) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let (h, w) = (rng.random_range(7..=10), rng.random_range(7..=10));
    let fleet = place_fleet(h, w, MIN_GRID_FLEET.to_vec(), &mut rng);
    let truth = fleet.placement.to_grid(h, w);
    let mut disclosed = Grid::new(h, w);
    for (r, c, cell) in truth.iter() {
        match rng.random_range(0..6) {
            0 => disclosed.set(r, c, cell),
            1 => disclosed.set(r, c, cell.generic()),
            _ => {}
        }
    }
    (truth, disclosed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn propagate_is_idempotent(seed in any::<u64>()) {
        let (_, mut grid) = random_disclosure(seed);
        propagate(&mut grid);
        let once = grid.clone();
        prop_assert!(!propagate(&mut grid));
        prop_assert_eq!(grid, once);
    }

    #[test]
    fn propagate_keeps_known_cells(seed in any::<u64>()) {
        let (_, before) = random_disclosure(seed);
        let mut after = before.clone();
        propagate(&mut after);
        for (r, c, cell) in before.known_cells() {
            prop_assert_eq!(after.get(r, c), cell);
        }
        prop_assert!(after.checksum() >= before.checksum());
    }

    #[test]
    fn propagate_agrees_with_truth(seed in any::<u64>()) {
        let (truth, mut grid) = random_disclosure(seed);
        propagate(&mut grid);
        for (r, c, cell) in grid.known_cells() {
            prop_assert_eq!(cell.is_occupied(), truth.get(r, c).is_occupied());
        }
    }

    #[test]
    fn refine_only_promotes(seed in any::<u64>()) {
        let (truth, mut grid) = random_disclosure(seed);
        propagate(&mut grid);
        let refined = refine(&grid);
        for (r, c, cell) in grid.iter() {
            let next = refined.get(r, c);
            if cell == Cell::Occupied {
                prop_assert!(next == Cell::Occupied || next == truth.get(r, c));
            } else {
                prop_assert_eq!(next, cell);
            }
        }
    }
}

#[test]
fn test_single_surrounds_with_water() {
    let mut grid = Grid::new(7, 7);
    grid.set(3, 3, Cell::Single);
    assert!(propagate(&mut grid));
    for dr in -1..=1isize {
        for dc in -1..=1isize {
            if dr != 0 || dc != 0 {
                assert_eq!(grid.at(3 + dr, 3 + dc), Some(Cell::Vacant));
            }
        }
    }
    assert_eq!(grid.known_cells().count(), 9);
}

#[test]
fn test_end_extends_hull() {
    let mut grid = Grid::new(7, 7);
    // Hull of a north end runs south.
    grid.set(2, 2, Cell::North);
    propagate(&mut grid);
    assert_eq!(grid.get(1, 2), Cell::Vacant);
    assert_eq!(grid.get(2, 1), Cell::Vacant);
    assert_eq!(grid.get(2, 3), Cell::Vacant);
    assert!(grid.get(3, 2).is_occupied());
    assert_eq!(grid.get(3, 1), Cell::Vacant);
    assert_eq!(grid.get(3, 3), Cell::Vacant);
    assert_eq!(grid.get(4, 2), Cell::Undisclosed);
}

#[test]
fn test_inner_on_border_runs_along_it() {
    let mut grid = Grid::new(7, 7);
    grid.set(0, 3, Cell::Inner);
    propagate(&mut grid);
    assert!(grid.get(0, 2).is_occupied());
    assert!(grid.get(0, 4).is_occupied());
    assert_eq!(grid.get(1, 3), Cell::Vacant);
}

#[test]
fn test_refine_labels() {
    let mut grid = Grid::filled(7, 7, Cell::Vacant);
    grid.set(1, 1, Cell::Occupied);
    grid.set(1, 2, Cell::Occupied);
    grid.set(1, 3, Cell::Occupied);
    grid.set(5, 5, Cell::Occupied);
    let refined = refine(&grid);
    assert_eq!(refined.get(1, 1), Cell::West);
    assert_eq!(refined.get(1, 2), Cell::Inner);
    assert_eq!(refined.get(1, 3), Cell::East);
    assert_eq!(refined.get(5, 5), Cell::Single);
}

#[test]
fn test_reconcile_demotes_unsupported_labels() {
    let mut grid = Grid::new(7, 7);
    grid.set(2, 2, Cell::Single);
    grid.set(2, 3, Cell::Occupied);
    let disclosed = Grid::new(7, 7);
    let out = reconcile(&grid, &disclosed);
    assert_eq!(out.get(2, 2), Cell::Occupied);

    let mut kept = Grid::new(7, 7);
    kept.set(2, 2, Cell::Single);
    let out = reconcile(&grid, &kept);
    assert_eq!(out.get(2, 2), Cell::Single);
}

#[test]
fn test_completed_ships_census() {
    let placement = Placement::new(vec![
        ships::ShipPlacement::new(3, ships::Orientation::Horizontal, 0, 0),
        ships::ShipPlacement::new(3, ships::Orientation::Vertical, 2, 5),
        ships::ShipPlacement::new(1, ships::Orientation::Horizontal, 6, 0),
    ]);
    let grid = placement.to_grid(7, 7);
    let census = completed_ships(&grid, 3);
    assert_eq!(census.count(3), 2);
    assert_eq!(census.count(1), 1);
    assert!(!census.overflow);

    let hist = vec![0, 1, 0, 3];
    assert_eq!(census.longest_unfinished(&hist), Some((3, 1)));
    assert_eq!(census.shortest_unfinished(&hist), Some(3));

    let census = completed_ships(&grid, 2);
    assert!(census.overflow);
}
