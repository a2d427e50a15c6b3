#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use ships::{
    deduce, generate, init_logging, preset, solve, validate, Difficulty, GameParams,
    GeneratedPuzzle, Puzzle, SolveOutcome, PRESETS,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum DifficultyArg {
    Basic,
    Intermediate,
    Advanced,
    Unreasonable,
}

#[cfg(feature = "std")]
impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Basic => Difficulty::Basic,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Advanced => Difficulty::Advanced,
            DifficultyArg::Unreasonable => Difficulty::Unreasonable,
        }
    }
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct PuzzleArgs {
    #[arg(long, default_value_t = 8)]
    height: usize,
    #[arg(long, default_value_t = 10)]
    width: usize,
    #[arg(long, value_enum, default_value_t = DifficultyArg::Intermediate)]
    difficulty: DifficultyArg,
    #[arg(long, help = "Use a named preset instead (e.g., --preset \"10x12 Advanced\")")]
    preset: Option<String>,
    #[arg(long, help = "Fix RNG seed for reproducible puzzles (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Generate a puzzle and print it with its sums.
    Generate {
        #[command(flatten)]
        args: PuzzleArgs,
        /// Also print the solution.
        #[arg(long)]
        reveal: bool,
    },
    /// Generate a puzzle, then solve it with the exact and logical solvers.
    Solve {
        #[command(flatten)]
        args: PuzzleArgs,
    },
    /// List the built-in parameter presets.
    Presets,
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args, reveal } => {
            let generated = build(&args)?;
            print_puzzle(&generated.puzzle);
            println!();
            println!(
                "Fleet: {:?}, {} calibration steps ({} harder, {} disambiguated, {} easier)",
                generated.puzzle.ships(),
                generated.stats.steps,
                generated.stats.hardened,
                generated.stats.disambiguated,
                generated.stats.eased,
            );
            if reveal {
                println!();
                println!(
                    "{}",
                    generated
                        .solution
                        .to_grid(generated.puzzle.height(), generated.puzzle.width())
                );
            }
        }
        Commands::Solve { args } => {
            let generated = build(&args)?;
            let puzzle = &generated.puzzle;
            print_puzzle(puzzle);
            println!();

            let deduction = deduce(puzzle, Difficulty::from(args.difficulty));
            println!(
                "Logical solver: {:?} ({} ship cells, {} water cells found)",
                deduction.verdict, deduction.occupied, deduction.vacant
            );

            let solution = solve(puzzle, None);
            println!("Exact solver: {} placement attempts", solution.calls);
            match solution.outcome {
                SolveOutcome::Unique(placement) => {
                    let grid = placement.to_grid(puzzle.height(), puzzle.width());
                    let check = validate(puzzle, &grid).map_err(|e| anyhow::anyhow!(e))?;
                    println!("{}", grid);
                    println!("Solved: {}", check.solved);
                }
                SolveOutcome::Ambiguous(..) => println!("{}", ships::PuzzleError::Ambiguous),
                SolveOutcome::Infeasible => println!("{}", ships::PuzzleError::Infeasible),
                SolveOutcome::BudgetExceeded => {
                    println!("{}", ships::PuzzleError::BudgetExceeded)
                }
            }
        }
        Commands::Presets => {
            for (name, params) in PRESETS.iter() {
                println!(
                    "{:<20} {}x{} {}",
                    name, params.height, params.width, params.difficulty
                );
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn build(args: &PuzzleArgs) -> anyhow::Result<GeneratedPuzzle> {
    let params = match &args.preset {
        Some(name) => {
            preset(name).ok_or_else(|| anyhow::anyhow!("unknown preset '{}'", name))?
        }
        None => GameParams::new(args.height, args.width, args.difficulty.into()),
    };
    let mut rng = if let Some(s) = args.seed {
        println!("Using fixed seed: {} (puzzle will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };
    generate(&params, &mut rng).map_err(|e| anyhow::anyhow!(e))
}

/// Print the disclosed grid with row sums on the right and column sums
/// below; hidden sums show as `?`.
#[cfg(feature = "std")]
fn print_puzzle(puzzle: &Puzzle) {
    let show = |s: Option<usize>| s.map_or_else(|| "?".to_string(), |v| v.to_string());
    for r in 0..puzzle.height() {
        let row: Vec<String> = puzzle
            .disclosed()
            .row(r)
            .iter()
            .map(|c| format!("{:>2}", c))
            .collect();
        println!("{} | {}", row.join(""), show(puzzle.row_sums()[r]));
    }
    println!("{}", "--".repeat(puzzle.width()));
    let cols: Vec<String> = puzzle
        .col_sums()
        .iter()
        .map(|&s| format!("{:>2}", show(s)))
        .collect();
    println!("{}", cols.join(""));
}
