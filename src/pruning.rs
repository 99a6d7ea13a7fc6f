//! Pruning tables: exact distances of the permutation and twist projections.
//!
//! A face turn moves the corner permutation and the corner twists
//! independently, so each projection is a small puzzle of its own (5040
//! permutations and 729 twist patterns with the reference corner fixed).
//! Solving a state takes at least as many moves as solving either projection,
//! which makes the larger of the two table entries an admissible heuristic.

use std::sync::OnceLock;

use crate::cube::{CubeState, Move};

/// Number of permutation indices, `8!`.
const PERMUTATION_COUNT: usize = 40320;

/// Number of twist indices, `3^8`.
const TWIST_COUNT: usize = 6561;

/// Marks projections the generators never reach.
const UNREACHED: u8 = u8::MAX;

pub struct PruningTables {
    permutation: Vec<u8>,
    twist: Vec<u8>,
}

impl PruningTables {
    /// The tables for the F, R and U generators, built on first use.
    pub fn get() -> &'static PruningTables {
        static TABLES: OnceLock<PruningTables> = OnceLock::new();
        TABLES.get_or_init(Self::build)
    }

    fn build() -> Self {
        Self {
            permutation: distance_table(
                PERMUTATION_COUNT,
                CubeState::permutation_only,
                CubeState::permutation_index,
            ),
            twist: distance_table(TWIST_COUNT, CubeState::twist_only, CubeState::twist_index),
        }
    }

    /// A lower bound on the number of generator turns that solve `state`.
    ///
    /// States with a projection the generators cannot reach get a bound
    /// above any solution length.
    #[inline]
    pub fn admissible_heuristic(&self, state: &CubeState) -> usize {
        let permutation = self.permutation[state.permutation_index()];
        let twist = self.twist[state.twist_index()];
        permutation.max(twist) as usize
    }
}

/// Breadth-first distances from the solved state in one projection.
fn distance_table(
    size: usize,
    project: fn(&CubeState) -> CubeState,
    index: fn(&CubeState) -> usize,
) -> Vec<u8> {
    let mut distances = vec![UNREACHED; size];
    let solved = project(&CubeState::SOLVED);
    distances[index(&solved)] = 0;

    let mut layer = vec![solved];
    let mut distance = 0;
    while !layer.is_empty() {
        distance += 1;
        let mut next_layer = Vec::new();
        for state in &layer {
            for mv in Move::GENERATORS {
                let next = project(&state.apply(mv));
                let slot = &mut distances[index(&next)];
                if *slot == UNREACHED {
                    *slot = distance;
                    next_layer.push(next);
                }
            }
        }
        layer = next_layer;
    }

    distances
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    fn reached(table: &[u8]) -> Vec<u8> {
        table.iter().copied().filter(|&d| d != UNREACHED).collect()
    }

    #[test]
    fn test_projection_sizes() {
        let tables = PruningTables::get();
        // 7! arrangements and 3^6 twist patterns with the reference corner home
        let permutation = reached(&tables.permutation);
        let twist = reached(&tables.twist);
        assert_eq!(permutation.len(), 5040);
        assert_eq!(twist.len(), 729);
        assert_eq!(permutation.iter().max(), Some(&8));
        assert_eq!(twist.iter().max(), Some(&8));
    }

    #[test]
    fn test_indices_are_in_range() {
        let mut state = CubeState::SOLVED;
        for mv in Move::ALL.iter().cycle().take(50) {
            state = state.apply(*mv);
            assert!(state.permutation_index() < PERMUTATION_COUNT);
            assert!(state.twist_index() < TWIST_COUNT);
        }
        assert_eq!(CubeState::SOLVED.permutation_index(), 0);
        assert_eq!(CubeState::SOLVED.twist_index(), 0);
    }

    #[test]
    fn test_heuristic_never_overestimates() {
        let tables = PruningTables::get();
        let mut distances = FxHashMap::default();
        distances.insert(CubeState::SOLVED, 0);
        let mut layer = vec![CubeState::SOLVED];

        for distance in 1..=6 {
            let mut next_layer = Vec::new();
            for state in layer {
                for mv in Move::GENERATORS {
                    let next = state.apply(mv);
                    if !distances.contains_key(&next) {
                        distances.insert(next, distance);
                        next_layer.push(next);
                    }
                }
            }
            layer = next_layer;
        }

        for (state, &distance) in &distances {
            assert!(tables.admissible_heuristic(state) <= distance, "{state:?}");
        }
        assert_eq!(tables.admissible_heuristic(&CubeState::SOLVED), 0);
    }
}
