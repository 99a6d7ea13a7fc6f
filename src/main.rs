//! Pocket Cube Solver
//!
//! Reads a 2x2x2 sticker coloring, either as 24 color letters or as the result
//! of a scramble, and prints how to hold the cube and a shortest sequence of
//! quarter turns that solves it.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use pocket::search::SearchStrategy;
use pocket::solver::QUARTER_TURN_DIAMETER;
use pocket::{parse_moves, ColorScheme, FaceletColoring, NotationError, SolveResult, Solver};

/// Scramble solved when no subcommand is given.
const DEMO_SCRAMBLE: &str = "RUFururDbuR";

/// Finds shortest solutions for the 2x2x2 Rubik's Cube.
#[derive(Parser)]
#[command(name = "pocket")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a sticker coloring.
    Solve {
        /// 24 color letters (W R G Y O B), four per face in U R F D L B order.
        #[arg(required_unless_present = "scramble", conflicts_with = "scramble")]
        coloring: Option<String>,
        /// Solve the cube produced by these moves instead, e.g. "RUFururDbuR".
        #[arg(long, value_name = "MOVES")]
        scramble: Option<String>,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Print the coloring produced by a sequence of moves.
    Scramble {
        /// Face letters; lowercase turns counter-clockwise.
        moves: String,
        /// Colors of the U R F D L B faces on the solved cube.
        #[arg(long, default_value_t = ColorScheme::default())]
        scheme: ColorScheme,
    },
}

#[derive(Args)]
struct SolveOptions {
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = SearchStrategy::default())]
    strategy: SearchStrategy,
    /// Give up on solutions longer than this.
    #[arg(long, default_value_t = QUARTER_TURN_DIAMETER)]
    max_depth: usize,
    /// Colors of the U R F D L B faces on the solved cube [default: read from
    /// the coloring, or WRGYOB for --scramble]
    #[arg(long)]
    scheme: Option<ColorScheme>,
}

impl SolveOptions {
    fn solver(&self) -> Solver {
        let solver = Solver::new()
            .with_search(self.strategy)
            .with_max_depth(self.max_depth);
        match self.scheme {
            Some(scheme) => solver.with_scheme(scheme),
            None => solver,
        }
    }
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            max_depth: QUARTER_TURN_DIAMETER,
            scheme: None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let outcome = match cli.command {
        Some(Command::Solve {
            coloring,
            scramble,
            options,
        }) => run_solve(coloring.as_deref(), scramble.as_deref(), &options),
        Some(Command::Scramble { moves, scheme }) => run_scramble(&moves, &scheme),
        None => {
            // default: solve the demo scramble
            println!("Solving the demo scramble {DEMO_SCRAMBLE}");
            println!();
            run_solve(None, Some(DEMO_SCRAMBLE), &SolveOptions::default())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads the coloring to solve, solves it, and prints the report.
fn run_solve(
    coloring: Option<&str>,
    scramble: Option<&str>,
    options: &SolveOptions,
) -> Result<(), NotationError> {
    let coloring = match scramble {
        Some(moves) => {
            let scheme = options.scheme.unwrap_or_default();
            FaceletColoring::solved(&scheme).scrambled(&parse_moves(moves)?)
        }
        None => coloring.unwrap_or_default().parse::<FaceletColoring>()?,
    };

    let result = options.solver().solve(&coloring);
    print!("{}", report(&coloring, &result));
    Ok(())
}

/// Prints the net and notation of a scrambled cube.
fn run_scramble(moves: &str, scheme: &ColorScheme) -> Result<(), NotationError> {
    let coloring = FaceletColoring::solved(scheme).scrambled(&parse_moves(moves)?);
    print!("{}", coloring.net());
    println!("{coloring}");
    Ok(())
}

/// Formats the input net followed by the verdict.
fn report(coloring: &FaceletColoring, result: &SolveResult) -> String {
    let mut output = coloring.net();
    output.push('\n');

    match result {
        SolveResult::Solved(solution) if !solution.is_empty() => {
            output.push_str(&format!("{}\n", solution.orientation()));
            output.push_str(&format!("Solution: {solution}\n"));
        }
        _ => output.push_str(&format!("{result}\n")),
    }

    output
}
