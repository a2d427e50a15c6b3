use ships::{
    preset, Cell, Difficulty, GameParams, Grid, MalformedInput, Puzzle, PuzzleError, PRESETS,
    SIZE_MAX, SIZE_MIN,
};

fn shown(sums: &[usize]) -> Vec<Option<usize>> {
    sums.iter().copied().map(Some).collect()
}

#[test]
fn test_new_sorts_fleet() {
    let puzzle = Puzzle::new(
        7,
        7,
        vec![2, 4, 3],
        shown(&[3, 0, 2, 2, 2, 0, 0]),
        shown(&[1, 1, 1, 3, 2, 1, 0]),
        Grid::new(7, 7),
    )
    .unwrap();
    assert_eq!(puzzle.ships(), &[4, 3, 2]);
    assert_eq!(puzzle.longest_ship(), 4);
    assert_eq!(puzzle.histogram(), vec![0, 0, 1, 1, 1]);
    assert_eq!(puzzle.ship_cells(), 9);
}

#[test]
fn test_rejects_bad_input() {
    let rows = shown(&[0; 7]);
    let cols = shown(&[0; 7]);
    let make = |h, w, ships: Vec<usize>, rows: Vec<Option<usize>>, cols: Vec<Option<usize>>| {
        Puzzle::new(h, w, ships, rows, cols, Grid::new(h, w))
    };

    assert_eq!(
        make(6, 7, vec![1], shown(&[0; 6]), cols.clone()),
        Err(MalformedInput::GridSize { height: 6, width: 7 }.into())
    );
    assert_eq!(
        make(7, 7, vec![], rows.clone(), cols.clone()),
        Err(MalformedInput::EmptyFleet.into())
    );
    assert_eq!(
        make(7, 7, vec![8], rows.clone(), cols.clone()),
        Err(MalformedInput::ShipLength(8).into())
    );
    assert_eq!(
        make(7, 7, vec![1], shown(&[0; 6]), cols.clone()),
        Err(MalformedInput::RowCount {
            expected: 7,
            found: 6
        }
        .into())
    );
    let mut wide = cols.clone();
    wide[2] = Some(8);
    assert_eq!(
        make(7, 7, vec![1], rows.clone(), wide),
        Err(MalformedInput::ColumnSum { col: 2, sum: 8 }.into())
    );
    assert_eq!(
        Puzzle::new(7, 7, vec![1], rows, cols, Grid::new(8, 7)),
        Err(PuzzleError::MalformedInput(MalformedInput::DisclosedShape))
    );
}

#[test]
fn test_hidden_totals() {
    let mut rows = shown(&[1, 0, 0, 0, 0, 0, 2]);
    rows[3] = None;
    let mut cols = shown(&[0, 0, 1, 1, 1, 0, 0]);
    cols[0] = None;
    let puzzle = Puzzle::new(7, 7, vec![3], rows, cols, Grid::new(7, 7)).unwrap();
    assert_eq!(puzzle.hidden_rows(), 1);
    assert_eq!(puzzle.hidden_cols(), 1);
    assert_eq!(puzzle.disclosed_row_total(), 3);
    assert_eq!(puzzle.disclosed_col_total(), 3);
}

#[test]
fn test_with_disclosed() {
    let puzzle = Puzzle::new(
        7,
        7,
        vec![1],
        shown(&[1, 0, 0, 0, 0, 0, 0]),
        shown(&[1, 0, 0, 0, 0, 0, 0]),
        Grid::new(7, 7),
    )
    .unwrap();
    let mut grid = Grid::new(7, 7);
    grid.set(0, 0, Cell::Single);
    let next = puzzle.with_disclosed(grid).unwrap();
    assert_eq!(next.disclosed().get(0, 0), Cell::Single);
    assert_eq!(next.ships(), puzzle.ships());
    assert!(puzzle.with_disclosed(Grid::new(7, 8)).is_err());
}

#[test]
fn test_difficulty_codes_and_names() {
    for d in Difficulty::ALL {
        assert_eq!(Difficulty::try_from(d.code()), Ok(d));
        assert_eq!(d.name().parse::<Difficulty>(), Ok(d));
    }
    assert_eq!("ADVANCED".parse::<Difficulty>(), Ok(Difficulty::Advanced));
    assert!("hard".parse::<Difficulty>().is_err());
    assert_eq!(
        Difficulty::try_from(4),
        Err(PuzzleError::MalformedInput(MalformedInput::DifficultyCode(4)))
    );
    assert_eq!(Difficulty::Unreasonable.to_string(), "Unreasonable");
    assert!(!Difficulty::Intermediate.uses_gap_rules());
    assert!(Difficulty::Advanced.uses_gap_rules());
}

#[test]
fn test_params_validate() {
    assert!(GameParams::default().validate().is_ok());
    assert!(GameParams::new(SIZE_MIN, SIZE_MAX, Difficulty::Basic)
        .validate()
        .is_ok());
    assert_eq!(
        GameParams::new(SIZE_MAX + 1, 10, Difficulty::Basic).validate(),
        Err(MalformedInput::GridSize {
            height: SIZE_MAX + 1,
            width: 10
        })
    );
}

#[test]
fn test_presets() {
    assert!(PRESETS.iter().all(|(_, p)| p.validate().is_ok()));
    assert_eq!(
        preset("10x12 advanced"),
        Some(GameParams::new(10, 12, Difficulty::Advanced))
    );
    assert_eq!(preset("huge"), None);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        PuzzleError::Ambiguous.to_string(),
        "Multiple solutions exist for this puzzle"
    );
    assert_eq!(
        PuzzleError::from(MalformedInput::EmptyFleet).to_string(),
        "Malformed input: at least one ship is required"
    );
}
