use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use ships::{deduce, generate, solve, validate, Difficulty, GameParams, SolveOutcome};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <seed> <count> [difficulty]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let count: usize = args[2].parse()?;
    let difficulty: Difficulty = match args.get(3) {
        Some(name) => name.parse().map_err(|e| anyhow::anyhow!("{}", e))?,
        None => Difficulty::Intermediate,
    };
    let params = GameParams::new(8, 10, difficulty);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut puzzles = Vec::with_capacity(count);
    let mut unique = 0;
    for _ in 0..count {
        let generated = generate(&params, &mut rng).map_err(|e| anyhow::anyhow!(e))?;
        let puzzle = &generated.puzzle;
        let truth = generated.solution.to_grid(puzzle.height(), puzzle.width());
        let valid = validate(puzzle, &truth).map_err(|e| anyhow::anyhow!(e))?;
        let solution = solve(puzzle, None);
        let exact = match solution.outcome {
            SolveOutcome::Unique(found) => {
                unique += 1;
                if found.same_layout(&generated.solution, puzzle.height(), puzzle.width()) {
                    "unique"
                } else {
                    "unique-mismatch"
                }
            }
            SolveOutcome::Ambiguous(..) => "ambiguous",
            SolveOutcome::Infeasible => "infeasible",
            SolveOutcome::BudgetExceeded => "budget",
        };
        puzzles.push(json!({
            "ships": puzzle.ships(),
            "stats": generated.stats,
            "logic": format!("{:?}", deduce(puzzle, difficulty).verdict),
            "exact": exact,
            "calls": solution.calls,
            "truth_solves": valid.solved,
        }));
    }

    let result = json!({
        "seed": seed,
        "difficulty": difficulty.name(),
        "count": count,
        "unique": unique,
        "puzzles": puzzles,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
