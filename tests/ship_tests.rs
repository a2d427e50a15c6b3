use ships::{Cell, Orientation, Placement, ShipPlacement};

#[test]
fn test_cells_and_contains() {
    let ship = ShipPlacement::new(4, Orientation::Vertical, 0, 2);
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    for (r, c) in cells {
        assert!(ship.contains(r, c));
    }
    assert!(!ship.contains(4, 2));
}

#[test]
fn test_fits() {
    assert!(ShipPlacement::new(3, Orientation::Horizontal, 6, 4).fits(7, 7));
    assert!(!ShipPlacement::new(3, Orientation::Horizontal, 6, 5).fits(7, 7));
    assert!(!ShipPlacement::new(3, Orientation::Vertical, 5, 0).fits(7, 7));
    assert!(!ShipPlacement::new(0, Orientation::Vertical, 0, 0).fits(7, 7));
}

#[test]
fn test_segment_labels() {
    let v = ShipPlacement::new(3, Orientation::Vertical, 1, 1);
    assert_eq!(v.segment_cell(0), Cell::North);
    assert_eq!(v.segment_cell(1), Cell::Inner);
    assert_eq!(v.segment_cell(2), Cell::South);

    let h = ShipPlacement::new(2, Orientation::Horizontal, 1, 1);
    assert_eq!(h.segment_cell(0), Cell::West);
    assert_eq!(h.segment_cell(1), Cell::East);

    let single = ShipPlacement::new(1, Orientation::Horizontal, 0, 0);
    assert_eq!(single.segment_cell(0), Cell::Single);
}

#[test]
fn test_halo_is_clamped() {
    let corner = ShipPlacement::new(2, Orientation::Horizontal, 0, 0);
    let halo = corner.halo(7, 7);
    // 2x3 box: the ship plus its margin inside the grid.
    assert_eq!(halo.count_ones(), 6);
    assert!(halo.contains(1, 2));
    assert!(!halo.contains(2, 0));

    let middle = ShipPlacement::new(3, Orientation::Vertical, 2, 3);
    assert_eq!(middle.halo(8, 8).count_ones(), 5 * 3);
}

#[test]
fn test_ordinal_order() {
    let a = ShipPlacement::new(2, Orientation::Horizontal, 6, 6);
    let b = ShipPlacement::new(2, Orientation::Vertical, 0, 0);
    assert!(a.ordinal(7, 8) < b.ordinal(7, 8));
    assert_eq!(b.ordinal(7, 8), 56);
}

fn sample() -> Placement {
    Placement::new(vec![
        ShipPlacement::new(3, Orientation::Horizontal, 0, 0),
        ShipPlacement::new(2, Orientation::Vertical, 2, 4),
        ShipPlacement::new(1, Orientation::Horizontal, 6, 6),
    ])
}

#[test]
fn test_sums() {
    let p = sample();
    assert_eq!(p.row_sums(7), vec![3, 0, 1, 1, 0, 0, 1]);
    assert_eq!(p.col_sums(7), vec![1, 1, 1, 0, 2, 0, 1]);
}

#[test]
fn test_to_grid() {
    let grid = sample().to_grid(7, 7);
    assert_eq!(grid.get(0, 0), Cell::West);
    assert_eq!(grid.get(0, 1), Cell::Inner);
    assert_eq!(grid.get(0, 2), Cell::East);
    assert_eq!(grid.get(2, 4), Cell::North);
    assert_eq!(grid.get(3, 4), Cell::South);
    assert_eq!(grid.get(6, 6), Cell::Single);
    assert_eq!(grid.occupied_count(), 6);
    assert_eq!(grid.vacant_count(), 49 - 6);
}

#[test]
fn test_same_layout_ignores_order() {
    let p = sample();
    let mut ships = p.ships.clone();
    ships.reverse();
    let q = Placement::new(ships);
    assert_ne!(p, q);
    assert!(p.same_layout(&q, 7, 7));

    let moved = Placement::new(vec![ShipPlacement::new(3, Orientation::Horizontal, 0, 1)]);
    assert!(!p.same_layout(&moved, 7, 7));
}

#[test]
fn test_display() {
    let ship = ShipPlacement::new(3, Orientation::Vertical, 2, 5);
    assert_eq!(ship.to_string(), "3V@(2, 5)");
}
