//! Optimal solver for the 2x2x2 cube.
//!
//! Solving runs in four steps:
//! - Parse the sticker coloring into a corner state (bad colorings fail here)
//! - Reject states no sequence of turns can reach (duplicated pieces, bad twist)
//! - Rotate the whole cube so the reference corner is home; the user is told
//!   how to hold the cube to match
//! - Search for a shortest sequence of F, R and U quarter turns

use std::fmt;
use std::time::Instant;

use log::{debug, error, info};
use thiserror::Error;

use crate::cube::{format_moves, CubeState, Move, ValidationError};
use crate::facelets::{ColorScheme, FaceletColoring};
use crate::geometry::HoldingOrientation;
use crate::pruning::PruningTables;
use crate::search::{SearchSpace, SearchStrategy, ShortestPath};

/// Every solvable 2x2x2 needs at most this many quarter turns.
pub const QUARTER_TURN_DIAMETER: usize = 14;

/// Shown instead of an empty move list.
pub const ALREADY_SOLVED_MESSAGE: &str = "Cube is already solved.";

/// Shown for any coloring that cannot be solved.
pub const UNSOLVABLE_MESSAGE: &str = "This cube is impossible to solve.";

/// A parsed state that no sequence of turns can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("a corner piece is missing or appears twice")]
    CornerPermutation,
    #[error("corner twists add up to {remainder} modulo 3")]
    Twist { remainder: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid coloring: {0}")]
    Validation(#[from] ValidationError),
    #[error("unreachable cube: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("no solution within {max_depth} moves")]
    SearchExhausted { max_depth: usize },
}

/// A shortest solution, valid once the cube is held as `orientation` says.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    orientation: HoldingOrientation,
    moves: Vec<Move>,
}

impl Solution {
    pub fn orientation(&self) -> HoldingOrientation {
        self.orientation
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.moves.is_empty() {
            f.write_str(ALREADY_SOLVED_MESSAGE)
        } else {
            f.write_str(&format_moves(&self.moves))
        }
    }
}

/// What the user gets back: a solution, or the verdict that there is none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveResult {
    Solved(Solution),
    Unsolvable,
}

impl SolveResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveResult::Solved(solution) => Some(solution),
            SolveResult::Unsolvable => None,
        }
    }

    pub fn is_solvable(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }
}

impl From<Result<Solution, SolveError>> for SolveResult {
    fn from(result: Result<Solution, SolveError>) -> Self {
        match result {
            Ok(solution) => SolveResult::Solved(solution),
            Err(err) => {
                debug!("Reporting unsolvable: {err}");
                SolveResult::Unsolvable
            }
        }
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveResult::Solved(solution) => solution.fmt(f),
            SolveResult::Unsolvable => f.write_str(UNSOLVABLE_MESSAGE),
        }
    }
}

/// Canonical cube states under the F, R and U quarter turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubeSpace;

impl SearchSpace for CubeSpace {
    type State = CubeState;
    type Move = Move;

    fn moves(&self) -> &[Move] {
        &Move::GENERATORS
    }

    #[inline]
    fn apply(&self, state: &CubeState, mv: Move) -> CubeState {
        state.apply(mv)
    }

    fn goal(&self) -> CubeState {
        CubeState::SOLVED
    }

    #[inline]
    fn is_goal(&self, state: &CubeState) -> bool {
        state.is_solved()
    }

    fn inverse(&self, mv: Move) -> Move {
        mv.inverse()
    }

    /// Undoing the previous turn, or turning one face a third time in a row
    /// (three quarter turns are one quarter turn the other way). A half turn
    /// is only ever spelled clockwise.
    fn is_redundant(&self, path: &[Move], next: Move) -> bool {
        match *path {
            [.., last] if last == next.inverse() => true,
            [.., last] if last == next && !next.clockwise => true,
            [.., earlier, last] => earlier.face == next.face && last.face == next.face,
            _ => false,
        }
    }

    #[inline]
    fn admissible_heuristic(&self, state: &CubeState) -> usize {
        PruningTables::get().admissible_heuristic(state)
    }
}

/// Solver configuration, generic over the search implementation.
#[derive(Clone, Debug)]
pub struct Solver<P = SearchStrategy> {
    search: P,
    max_depth: usize,
    scheme: Option<ColorScheme>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            search: SearchStrategy::default(),
            max_depth: QUARTER_TURN_DIAMETER,
            scheme: None,
        }
    }
}

impl<P: ShortestPath> Solver<P> {
    #[must_use]
    pub fn with_search<Q: ShortestPath>(self, search: Q) -> Solver<Q> {
        Solver {
            search,
            max_depth: self.max_depth,
            scheme: self.scheme,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Colors are read through `scheme` instead of the one inferred from
    /// each coloring.
    #[must_use]
    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Solves a coloring; every failure reads as [`SolveResult::Unsolvable`].
    pub fn solve(&self, coloring: &FaceletColoring) -> SolveResult {
        self.try_solve(coloring).into()
    }

    /// Like [`Solver::solve`], but says why a coloring has no solution.
    pub fn try_solve(&self, coloring: &FaceletColoring) -> Result<Solution, SolveError> {
        info!("Solving {coloring}");
        let state = match &self.scheme {
            Some(scheme) => CubeState::parse_with_scheme(coloring, scheme)?,
            None => CubeState::parse(coloring)?,
        };
        self.solve_state(&state)
    }

    /// Solves an already parsed state.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Invariant`] without searching if the state is
    /// unreachable, and [`SolveError::SearchExhausted`] if the depth bound is
    /// below the length of every solution.
    pub fn solve_state(&self, state: &CubeState) -> Result<Solution, SolveError> {
        check_invariants(state)?;

        let start = Instant::now();
        let (canonical, orientation) = state.canonicalize();
        debug!("Holding orientation: {orientation}");

        let moves = self
            .search
            .shortest_path(&CubeSpace, canonical, self.max_depth)
            .ok_or_else(|| {
                error!("No solution within {} moves", self.max_depth);
                SolveError::SearchExhausted {
                    max_depth: self.max_depth,
                }
            })?;

        info!(
            "Found a {}-move solution in {:.3}s",
            moves.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(Solution { orientation, moves })
    }
}

/// Rejects states outside the group generated by face turns.
fn check_invariants(state: &CubeState) -> Result<(), InvariantViolation> {
    if !state.parity_ok() {
        return Err(InvariantViolation::CornerPermutation);
    }
    if !state.twist_ok() {
        return Err(InvariantViolation::Twist {
            remainder: state.twist_remainder(),
        });
    }
    Ok(())
}

/// Solves `coloring` with the default configuration.
pub fn solve(coloring: &FaceletColoring) -> SolveResult {
    Solver::default().solve(coloring)
}
