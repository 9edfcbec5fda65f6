//! CLI entry point for the Hexagon-1 solver.
//!
//! Usage:
//!   hexagon-solver solve [options]
//!   hexagon-solver show [--scramble <moves>]
//!
//! Options:
//!   --config <file>        JSON or TOML run configuration
//!   --scramble <moves>     Scramble as "top bottom / top bottom / ..."
//!   --max-depth <n>        Recursion bound (default: 8)
//!   --threads <n>          Worker threads (default: one per core)
//!   --goal <goal>          cube-shape or solved (default: cube-shape)
//!   --json                 Print a JSON report instead of text
//!   -v, -vv                More logging on stderr (or set RUST_LOG)
//!
//! Exit status: 0 when a solution is found, 1 when the search is exhausted,
//! 2 on bad input.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hexagon_solver::{
    find_solution, parse_sequence, Config, ConfigError, GoalConfig, Puzzle, SearchResult,
    Solution, SolverError,
};

#[derive(Parser)]
#[command(name = "hexagon-solver")]
#[command(about = "Bounded parallel solver for the Hexagon-1 twisty puzzle")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble the puzzle and search for a solution
    Solve {
        /// Path to a JSON or TOML run configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Scramble applied to the solved state, e.g. "3 0 / -3 -3 / 0 3"
        #[arg(long, allow_hyphen_values = true)]
        scramble: Option<String>,

        /// Maximum recursion depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Number of worker threads
        #[arg(long)]
        threads: Option<usize>,

        /// What counts as solved
        #[arg(long, value_enum)]
        goal: Option<GoalArg>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Print the scrambled puzzle slot by slot
    Show {
        /// Scramble applied to the solved state
        #[arg(long, allow_hyphen_values = true)]
        scramble: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    CubeShape,
    Solved,
}

/// Output format for --json
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveReport {
    found: bool,
    search_exhausted: bool,
    nodes_explored: u64,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_moves: Option<Vec<(i32, i32)>>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Puzzle(#[from] hexagon_solver::PuzzleError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn scrambled(config: &Config) -> Result<Puzzle, CliError> {
    let mut puzzle = Puzzle::solved();
    puzzle.apply_sequence(&config.scramble)?;
    Ok(puzzle)
}

fn load_config(path: Option<PathBuf>, scramble: Option<String>) -> Result<Config, CliError> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(scramble) = scramble {
        config.scramble = parse_sequence(&scramble).map_err(ConfigError::from)?;
    }
    Ok(config)
}

fn format_result(result: &SearchResult) -> SolveReport {
    let canonical = result.solution.as_ref().map(Solution::canonical);
    SolveReport {
        found: result.solution.is_some(),
        search_exhausted: result.search_exhausted,
        nodes_explored: result.nodes_explored,
        time_elapsed_ms: result.time_elapsed_ms,
        solution: result.solution.as_ref().map(|s| s.render()),
        move_count: canonical.as_ref().map(|s| s.moves.len()),
        raw_moves: result
            .solution
            .as_ref()
            .map(|s| s.moves.iter().map(|mv| mv.centered()).collect()),
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Commands::Solve {
            config,
            scramble,
            max_depth,
            threads,
            goal,
            json,
        } => {
            let mut config = load_config(config, scramble)?;
            if let Some(max_depth) = max_depth {
                config.max_depth = max_depth;
            }
            if threads.is_some() {
                config.threads = threads;
            }
            if let Some(goal) = goal {
                config.goal = match goal {
                    GoalArg::CubeShape => GoalConfig::CubeShape,
                    GoalArg::Solved => GoalConfig::Solved,
                };
            }

            let solver_config = config.solver_config()?;
            let start = scrambled(&config)?;
            let result = find_solution(&start, &solver_config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&format_result(&result))?);
            } else {
                match &result.solution {
                    Some(solution) => println!("{solution}"),
                    None => println!("No solution found."),
                }
            }

            Ok(if result.solution.is_some() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Show { scramble } => {
            let config = load_config(None, scramble)?;
            println!("{}", scrambled(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
