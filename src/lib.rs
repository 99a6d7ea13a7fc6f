//! Pocket Cube Solver Library
//!
//! Finds shortest quarter-turn solutions for the 2x2x2 Rubik's Cube from a
//! sticker coloring, or reports that the coloring cannot be solved.
//!
//! ```
//! use pocket::{parse_moves, FaceletColoring, SolveResult, Solver};
//!
//! let scramble = parse_moves("RUF").unwrap();
//! let coloring = FaceletColoring::default().scrambled(&scramble);
//!
//! let SolveResult::Solved(solution) = Solver::new().solve(&coloring) else {
//!     panic!("a scrambled cube is always solvable");
//! };
//! assert_eq!(solution.to_string(), "f, u, r");
//! ```

pub mod cube;
pub mod facelets;
pub mod geometry;
pub mod pruning;
pub mod search;
pub mod solver;

pub use cube::{format_moves, parse_moves, CubeState, Move, ValidationError};
pub use facelets::{Color, ColorScheme, FaceletColoring, NotationError};
pub use geometry::{Face, HoldingOrientation};
pub use search::SearchStrategy;
pub use solver::{solve, InvariantViolation, SolveError, SolveResult, Solution, Solver};
