//! Puzzle generation calibrated to a difficulty tier.
//!
//! A random fleet layout is the ground truth. Its sums and a first batch of
//! disclosed cells are derived from it, then a calibration loop grades the
//! puzzle with the logical solver (and the exact solver at the hardest tier)
//! and nudges the disclosed information until the grade matches the target.
//! The loop itself is the pure [`transition`] function plus the mutations
//! its [`Action`]s name.

use alloc::vec;
use alloc::vec::Vec;
use libm::round;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    cell::Cell,
    common::{Difficulty, PuzzleError},
    config::{
        GameParams, CALIBRATION_CAP, MIN_GRID_FLEET, SIZE_MIN, UNREASONABLE_BUDGET,
        UNREASONABLE_MIN_CALLS,
    },
    grid::Grid,
    logic::{deduce, Verdict},
    placer::{place_fleet, PlacedFleet},
    puzzle::Puzzle,
    ship::Placement,
    solver::{solve, SolveOutcome, Solution},
};

/// Uniform draw from `0..n`; zero when the range is empty.
fn upto<R: Rng + ?Sized>(rng: &mut R, n: usize) -> usize {
    if n == 0 {
        0
    } else {
        rng.random_range(0..n)
    }
}

fn share(n: usize, ratio: f64) -> usize {
    round(n as f64 * ratio) as usize
}

/// Pick the fleet for a grid.
///
/// The smallest grids always get [`MIN_GRID_FLEET`]. Otherwise the largest
/// length is `round(0.6 · min(H, W))` and the lengths below it are split in
/// four groups, two ships drawn from each of the upper three. The lowest
/// group holds one ship (two for an eight-ship fleet); the easy tiers take
/// the top of that group since short ships are the hardest to find.
pub fn select_fleet<R: Rng + ?Sized>(params: &GameParams, rng: &mut R) -> Vec<usize> {
    let short = params.height.min(params.width);
    if short == SIZE_MIN {
        return MIN_GRID_FLEET.to_vec();
    }
    let count = if params.difficulty == Difficulty::Basic {
        7
    } else {
        7 + upto(rng, 2)
    };
    let ship_max = share(short, 0.6);
    // Slightly under 4 so an exact multiple lands in the lower group.
    let group = ((ship_max - 1) as f64 / 3.9999) as usize;

    let mut ships = vec![0; count];
    for i in 0..3 {
        for k in 0..2 {
            ships[2 * i + k] = group * (i + 1) + 2 + upto(rng, group);
        }
    }
    if params.difficulty <= Difficulty::Intermediate {
        ships[6] = group + 1;
        ships[count - 1] = group + 1;
    } else {
        ships[6] = 1 + upto(rng, group + 1);
        ships[count - 1] = 1 + upto(rng, group + 1);
    }
    ships.sort_unstable_by(|a, b| b.cmp(a));
    ships
}

/// How much to disclose before calibration starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisclosurePlan {
    pub hidden_sums: usize,
    pub vacant: usize,
    /// Ship cells disclosed as plain `Occupied`.
    pub generic: usize,
    /// Ship cells disclosed with their refined label.
    pub refined: usize,
}

/// Starting amounts per tier. Generic cells count half as much as refined
/// ones at the middle tiers, so twice as many are shown.
pub fn disclosure_plan<R: Rng + ?Sized>(
    params: &GameParams,
    ship_cells: usize,
    rng: &mut R,
) -> DisclosurePlan {
    let (h, w) = (params.height, params.width);
    let empty = (h * w).saturating_sub(ship_cells);
    let mut plan = match params.difficulty {
        Difficulty::Basic => DisclosurePlan {
            hidden_sums: 0,
            vacant: share(empty, 0.2),
            generic: 0,
            refined: share(ship_cells, 0.6),
        },
        Difficulty::Intermediate => {
            let paired = share(ship_cells, 0.3);
            let generic = upto(rng, share(ship_cells, 0.2));
            DisclosurePlan {
                hidden_sums: 0,
                vacant: share(empty, 0.1),
                generic: 2 * generic,
                refined: paired.saturating_sub(generic),
            }
        }
        Difficulty::Advanced => {
            let paired = share(ship_cells, 0.2);
            let generic = upto(rng, paired);
            DisclosurePlan {
                hidden_sums: share(h + w, 0.1) + upto(rng, 2),
                vacant: share(empty, 0.05),
                generic: 2 * generic,
                refined: paired - generic,
            }
        }
        Difficulty::Unreasonable => {
            let paired = share(ship_cells, 0.15);
            let generic = upto(rng, paired + 1);
            DisclosurePlan {
                hidden_sums: share(h + w, 0.2) + upto(rng, 3),
                vacant: 0,
                generic,
                refined: paired - generic,
            }
        }
    };
    plan.hidden_sums = plan.hidden_sums.min(h + w);
    plan.vacant = plan.vacant.min(empty);
    if plan.generic + plan.refined > ship_cells {
        plan.generic = 0;
        plan.refined = ship_cells;
    }
    plan
}

/// Calibration state carried between grading rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    /// Accept the next uniquely solvable puzzle even if it is not exactly
    /// at the target tier.
    pub fast_return: bool,
    /// Times the puzzle was made easier.
    pub reductions: usize,
}

/// What the exact solver reported, without the placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactVerdict {
    Unique { calls: usize },
    Ambiguous,
    Infeasible,
    BudgetExceeded,
}

impl From<&Solution> for ExactVerdict {
    fn from(solution: &Solution) -> Self {
        match solution.outcome {
            SolveOutcome::Unique(_) => ExactVerdict::Unique {
                calls: solution.calls,
            },
            SolveOutcome::Ambiguous(..) => ExactVerdict::Ambiguous,
            SolveOutcome::Infeasible => ExactVerdict::Infeasible,
            SolveOutcome::BudgetExceeded => ExactVerdict::BudgetExceeded,
        }
    }
}

/// Grades from one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub logic: Verdict,
    /// Only run at the Unreasonable tier.
    pub exact: Option<ExactVerdict>,
}

/// Next step of the calibration loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    /// Too easy: hide a sum or a disclosed cell.
    Harden,
    /// Two solutions: disclose water where one of them has a ship.
    Disambiguate,
    /// Too hard: reveal a sum, water, or a refined ship cell.
    Ease,
}

/// Decide the next action from the grades of the current puzzle.
pub fn transition(
    state: Calibration,
    difficulty: Difficulty,
    measured: &Measurement,
) -> (Calibration, Action) {
    let action = match difficulty {
        Difficulty::Basic | Difficulty::Intermediate => match measured.logic {
            Verdict::SimpleRules => Action::Accept,
            _ => Action::Ease,
        },
        Difficulty::Advanced => match measured.logic {
            Verdict::AdvancedRules => Action::Accept,
            Verdict::SimpleRules if state.fast_return => Action::Accept,
            Verdict::SimpleRules => Action::Harden,
            Verdict::Unsolved => Action::Ease,
        },
        Difficulty::Unreasonable => match measured.exact {
            Some(ExactVerdict::Unique { calls }) => {
                let hard = calls >= UNREASONABLE_MIN_CALLS && measured.logic == Verdict::Unsolved;
                if hard || state.fast_return {
                    Action::Accept
                } else {
                    Action::Harden
                }
            }
            Some(ExactVerdict::Ambiguous) => Action::Disambiguate,
            _ => Action::Ease,
        },
    };
    let next = match action {
        Action::Disambiguate => Calibration {
            fast_return: true,
            ..state
        },
        Action::Ease => Calibration {
            fast_return: true,
            reductions: state.reductions + 1,
        },
        Action::Accept | Action::Harden => state,
    };
    (next, action)
}

/// Counters reported alongside a generated puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Grading rounds, the accepting one included.
    pub steps: usize,
    pub hardened: usize,
    pub disambiguated: usize,
    pub eased: usize,
    /// Ships removed from the fleet because it would not fit.
    pub dropped_ships: usize,
    /// Logical grade of the accepted puzzle.
    pub verdict: Verdict,
    /// Exact-solver work on the accepted puzzle, Unreasonable tier only.
    pub exact_calls: Option<usize>,
    /// Accepted because there was nothing left to reveal.
    pub degenerate: bool,
}

/// A puzzle together with the layout it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    pub puzzle: Puzzle,
    pub solution: Placement,
    pub stats: GenerationStats,
}

/// Generate a puzzle for `params`.
///
/// Dead ends inside generation are absorbed by retrying; an error means the
/// parameters were rejected or calibration did not settle within
/// [`CALIBRATION_CAP`] rounds, which indicates a defect.
pub fn generate<R: Rng + ?Sized>(
    params: &GameParams,
    rng: &mut R,
) -> Result<GeneratedPuzzle, PuzzleError> {
    params.validate()?;
    let (h, w, difficulty) = (params.height, params.width, params.difficulty);

    let fleet = select_fleet(params, rng);
    let PlacedFleet {
        ships,
        placement,
        dropped,
    } = place_fleet(h, w, fleet, rng);
    if placement.ships.is_empty() {
        return Err(PuzzleError::Internal("no ship could be placed"));
    }
    let plan = disclosure_plan(params, ships.iter().sum(), rng);
    log::debug!("fleet {:?}, initial disclosure {:?}", ships, plan);

    let mut work = Working::new(h, w, &placement, &plan, rng);
    let mut state = Calibration::default();
    let (mut hardened, mut disambiguated, mut eased) = (0, 0, 0);

    for step in 1..=CALIBRATION_CAP {
        let puzzle = work.puzzle(&ships)?;
        let deduction = deduce(&puzzle, difficulty);
        let exact = (difficulty == Difficulty::Unreasonable)
            .then(|| solve(&puzzle, Some(UNREASONABLE_BUDGET)));
        let measured = Measurement {
            logic: deduction.verdict,
            exact: exact.as_ref().map(ExactVerdict::from),
        };
        let (next, action) = transition(state, difficulty, &measured);
        state = next;
        log::debug!("calibration step {}: {:?} -> {:?}", step, measured, action);

        let mut degenerate = false;
        match action {
            Action::Accept => {}
            Action::Harden => {
                hardened += 1;
                work.harden(rng);
            }
            Action::Disambiguate => {
                disambiguated += 1;
                if let Some(SolveOutcome::Ambiguous(a, b)) = exact.map(|s| s.outcome) {
                    work.disambiguate(&a, &b, rng);
                }
            }
            Action::Ease => {
                eased += 1;
                if !work.ease(difficulty, &deduction.grid, rng) {
                    log::warn!("nothing left to reveal, accepting puzzle as is");
                    degenerate = true;
                }
            }
        }
        if action == Action::Accept || degenerate {
            let stats = GenerationStats {
                steps: step,
                hardened,
                disambiguated,
                eased,
                dropped_ships: dropped.len(),
                verdict: deduction.verdict,
                exact_calls: measured.exact.and_then(|e| match e {
                    ExactVerdict::Unique { calls } => Some(calls),
                    _ => None,
                }),
                degenerate,
            };
            return Ok(GeneratedPuzzle {
                puzzle,
                solution: placement,
                stats,
            });
        }
    }
    Err(PuzzleError::Internal("calibration did not converge"))
}

/// Mutable disclosure during calibration, next to the ground truth.
struct Working {
    truth: Grid,
    truth_rows: Vec<usize>,
    truth_cols: Vec<usize>,
    rows: Vec<Option<usize>>,
    cols: Vec<Option<usize>>,
    disclosed: Grid,
}

impl Working {
    fn new<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        placement: &Placement,
        plan: &DisclosurePlan,
        rng: &mut R,
    ) -> Self {
        let truth = placement.to_grid(height, width);
        let truth_rows = placement.row_sums(height);
        let truth_cols = placement.col_sums(width);
        let mut disclosed = Grid::new(height, width);

        let mut ship_cells: Vec<(usize, usize, Cell)> =
            truth.iter().filter(|&(_, _, c)| c.is_occupied()).collect();
        ship_cells.shuffle(rng);
        let mut picked = ship_cells.into_iter();
        for (r, c, _) in picked.by_ref().take(plan.generic) {
            disclosed.set(r, c, Cell::Occupied);
        }
        for (r, c, label) in picked.take(plan.refined) {
            disclosed.set(r, c, label);
        }

        let mut water: Vec<(usize, usize)> = truth
            .iter()
            .filter(|&(_, _, c)| !c.is_occupied())
            .map(|(r, c, _)| (r, c))
            .collect();
        water.shuffle(rng);
        for &(r, c) in water.iter().take(plan.vacant) {
            disclosed.set(r, c, Cell::Vacant);
        }

        let mut rows: Vec<Option<usize>> = truth_rows.iter().copied().map(Some).collect();
        let mut cols: Vec<Option<usize>> = truth_cols.iter().copied().map(Some).collect();
        let mut lines: Vec<usize> = (0..height + width).collect();
        lines.shuffle(rng);
        for &i in lines.iter().take(plan.hidden_sums) {
            if i < height {
                rows[i] = None;
            } else {
                cols[i - height] = None;
            }
        }

        Working {
            truth,
            truth_rows,
            truth_cols,
            rows,
            cols,
            disclosed,
        }
    }

    fn puzzle(&self, ships: &[usize]) -> Result<Puzzle, PuzzleError> {
        Puzzle::new(
            self.truth.height(),
            self.truth.width(),
            ships.to_vec(),
            self.rows.clone(),
            self.cols.clone(),
            self.disclosed.clone(),
        )
    }

    /// Line indices (rows first, then columns) whose sum is shown or hidden.
    fn lines(&self, shown: bool) -> Vec<usize> {
        self.rows
            .iter()
            .chain(self.cols.iter())
            .enumerate()
            .filter(|(_, s)| s.is_some() == shown)
            .map(|(i, _)| i)
            .collect()
    }

    fn set_line(&mut self, line: usize, shown: bool) {
        let h = self.rows.len();
        if line < h {
            self.rows[line] = shown.then_some(self.truth_rows[line]);
        } else {
            self.cols[line - h] = shown.then_some(self.truth_cols[line - h]);
        }
    }

    fn harden<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.random::<bool>() {
            let shown = self.lines(true);
            if !shown.is_empty() {
                self.set_line(shown[upto(rng, shown.len())], false);
                return;
            }
        }
        let known: Vec<(usize, usize)> = self
            .disclosed
            .known_cells()
            .map(|(r, c, _)| (r, c))
            .collect();
        if !known.is_empty() {
            let (r, c) = known[upto(rng, known.len())];
            self.disclosed.set(r, c, Cell::Undisclosed);
        }
    }

    /// Disclose as water a cell where either solution puts a ship that the
    /// ground truth does not have.
    fn disambiguate<R: Rng + ?Sized>(&mut self, a: &Placement, b: &Placement, rng: &mut R) {
        let (h, w) = (self.truth.height(), self.truth.width());
        let wrong: Vec<(usize, usize)> = (a.occupancy(h, w) | b.occupancy(h, w))
            .iter_set_bits()
            .filter(|&(r, c)| {
                !self.truth.get(r, c).is_occupied() && !self.disclosed.get(r, c).is_known()
            })
            .collect();
        if !wrong.is_empty() {
            let (r, c) = wrong[upto(rng, wrong.len())];
            self.disclosed.set(r, c, Cell::Vacant);
        }
    }

    /// Reveal one more piece of information. Below the Unreasonable tier,
    /// only cells the logical solver did not find are candidates.
    /// Returns `false` when no ship cell is left to reveal.
    fn ease<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, deduced: &Grid, rng: &mut R) -> bool {
        let change = upto(rng, 5);
        let hidden = self.lines(false);
        if change == 0 && !hidden.is_empty() {
            self.set_line(hidden[upto(rng, hidden.len())], true);
            return true;
        }
        let basis = if difficulty == Difficulty::Unreasonable {
            &self.disclosed
        } else {
            deduced
        };
        let open: Vec<(usize, usize, Cell)> = self
            .truth
            .iter()
            .filter(|&(r, c, _)| !basis.get(r, c).is_known())
            .collect();
        if change < 4 {
            let water: Vec<(usize, usize)> = open
                .iter()
                .filter(|(_, _, t)| !t.is_occupied())
                .map(|&(r, c, _)| (r, c))
                .collect();
            if !water.is_empty() {
                let (r, c) = water[upto(rng, water.len())];
                self.disclosed.set(r, c, Cell::Vacant);
            }
            return true;
        }
        let ships: Vec<(usize, usize, Cell)> =
            open.into_iter().filter(|(_, _, t)| t.is_occupied()).collect();
        if ships.is_empty() {
            return false;
        }
        let (r, c, label) = ships[upto(rng, ships.len())];
        self.disclosed.set(r, c, label);
        true
    }
}
