use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use taquin::{
    Algorithm, Board, Config, GOAL, Heuristic, ManhattanHeuristic, Move, NullHeuristic,
    SearchError, Solver,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Manhattan,
    Null,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmType {
    Astar,
    Iddfs,
    Both,
}

impl AlgorithmType {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            AlgorithmType::Astar => &[Algorithm::AStar],
            AlgorithmType::Iddfs => &[Algorithm::Iddfs],
            AlgorithmType::Both => &[Algorithm::Iddfs, Algorithm::AStar],
        }
    }
}

fn algorithm_name(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Iddfs => "iddfs",
        Algorithm::AStar => "astar",
    }
}

fn print_solution(board: &Board, solution: &[Move]) {
    println!("\nStarting position:\n{}", board);
    let mut board = *board;
    let total = solution.len();
    for (count, &direction) in solution.iter().enumerate() {
        match board.apply_move(direction) {
            Ok(next) => board = next,
            Err(err) => {
                eprintln!("Error replaying solution: {}", err);
                return;
            }
        }
        println!("Move blank {} ({}/{}):\n{}", direction, count + 1, total, board);
    }
    let plan: String = solution.iter().map(|direction| direction.letter()).collect();
    println!("Plan: {}", plan);
}

fn solve_helper<H: Heuristic>(
    board: &Board,
    config: Config,
    heuristic: H,
    algorithms: &[Algorithm],
    print: bool,
) -> anyhow::Result<()> {
    let mut solver = Solver::new(config, heuristic).context("invalid search limits")?;

    for &algorithm in algorithms {
        let result = solver.solve(board, algorithm);
        let stats = solver.stats();

        let (solved_char, steps) = match &result {
            Ok(solution) => ('Y', solution.len()),
            Err(SearchError::Unsolvable) => ('X', 0),
            Err(_) => ('N', 0),
        };

        println!(
            "algorithm: {:<6} solved: {}  steps: {:<3}  states: {:<8}  elapsed: {} ms",
            algorithm_name(algorithm),
            solved_char,
            steps,
            stats.nodes_expanded,
            stats.elapsed.as_millis()
        );

        match result {
            Ok(solution) if print => print_solution(board, &solution),
            Ok(_) => {}
            Err(err) => println!("  {}", err),
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "taquin")]
#[command(about = "An 8-puzzle solver", long_about = None)]
struct Args {
    /// Starting board, row-major, 0 or _ for the blank (e.g. 413726580)
    #[arg(value_name = "BOARD")]
    board: Option<String>,

    /// Scramble the goal with this many random moves when no board is given
    #[arg(short, long, default_value = "40")]
    scramble: usize,

    /// Seed for scrambling
    #[arg(long)]
    seed: Option<u64>,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value = "astar")]
    algorithm: AlgorithmType,

    /// Heuristic to use for solving
    #[arg(short = 'H', long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicType,

    /// Deepest bound tried by iterative deepening
    #[arg(long, default_value = "31")]
    max_depth: usize,

    /// Maximum number of nodes A* expands before giving up
    #[arg(short = 'n', long, default_value = "100000")]
    max_expansions: usize,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let board = match &args.board {
        Some(text) => Board::from_text(text).with_context(|| format!("invalid board {text:?}"))?,
        None => {
            let mut rng = match args.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_entropy(),
            };
            GOAL.scramble(&mut rng, args.scramble)
        }
    };

    let config = Config {
        max_depth: args.max_depth,
        max_expansions: args.max_expansions,
    };

    println!("Board:\n{}", board);

    let algorithms = args.algorithm.algorithms();
    match args.heuristic {
        HeuristicType::Manhattan => solve_helper(
            &board,
            config,
            ManhattanHeuristic::new(),
            algorithms,
            args.print_solution,
        ),
        HeuristicType::Null => solve_helper(
            &board,
            config,
            NullHeuristic::new(),
            algorithms,
            args.print_solution,
        ),
    }
}
