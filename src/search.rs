//! Shortest unweighted paths through an implicit move graph.
//!
//! Two strategies share the [`ShortestPath`] interface:
//! - [`IterativeDeepening`]: depth-first search with a growing depth bound
//!   (IDA*), run on an explicit stack so no recursion is involved. Branches
//!   whose [`SearchSpace::admissible_heuristic`] exceeds the remaining budget
//!   are cut. Memory stays proportional to the depth, and the first solution
//!   found follows the order of [`SearchSpace::moves`].
//! - [`MeetInTheMiddle`]: layer-by-layer breadth-first search from both the
//!   start and the goal, trading memory for far fewer visited nodes.

use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use log::debug;
use rustc_hash::FxHashMap;

/// A puzzle graph: states connected by invertible moves.
pub trait SearchSpace {
    type State: Copy + Eq + Hash + fmt::Debug;
    type Move: Copy + Eq + fmt::Debug;

    /// Moves tried from every state, in tie-break order.
    fn moves(&self) -> &[Self::Move];

    fn apply(&self, state: &Self::State, mv: Self::Move) -> Self::State;

    /// The unique goal state.
    fn goal(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool {
        *state == self.goal()
    }

    /// The move that undoes `mv`.
    fn inverse(&self, mv: Self::Move) -> Self::Move;

    /// Returns true if appending `next` to `path` can never lead to a shorter
    /// solution than some other sequence. Depth-first search skips such moves.
    fn is_redundant(&self, _path: &[Self::Move], _next: Self::Move) -> bool {
        false
    }

    /// A lower bound on the number of moves from `state` to the goal.
    fn admissible_heuristic(&self, _state: &Self::State) -> usize {
        0
    }
}

/// Finds a shortest move sequence from a start state to the goal.
pub trait ShortestPath {
    /// Returns `None` if no sequence of at most `max_depth` moves exists.
    fn shortest_path<S: SearchSpace>(
        &self,
        space: &S,
        start: S::State,
        max_depth: usize,
    ) -> Option<Vec<S::Move>>;
}

impl<T: ShortestPath + ?Sized> ShortestPath for &T {
    fn shortest_path<S: SearchSpace>(
        &self,
        space: &S,
        start: S::State,
        max_depth: usize,
    ) -> Option<Vec<S::Move>> {
        (**self).shortest_path(space, start, max_depth)
    }
}

/// Iterative deepening depth-first search, pruned by the space's heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct IterativeDeepening;

/// A state on the depth-first stack and the index of the next move to try.
#[derive(Clone, Copy)]
struct Frame<S> {
    state: S,
    next_move: usize,
}

impl IterativeDeepening {
    /// Searches every path of exactly `depth` moves, leaving the first
    /// solution in `path`.
    fn search_depth<S: SearchSpace>(
        space: &S,
        start: S::State,
        depth: usize,
        path: &mut Vec<S::Move>,
        nodes_visited: &mut u64,
    ) -> bool {
        let moves = space.moves();
        path.clear();

        *nodes_visited += 1;
        if space.is_goal(&start) {
            return true;
        }

        let mut stack = vec![Frame {
            state: start,
            next_move: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            // the stack is one deeper than the path: backtrack at the bound or
            // once every move has been tried
            if path.len() == depth || frame.next_move == moves.len() {
                stack.pop();
                path.pop();
                continue;
            }

            let mv = moves[frame.next_move];
            frame.next_move += 1;
            if space.is_redundant(path, mv) {
                continue;
            }

            let next = space.apply(&frame.state, mv);
            if path.len() + 1 + space.admissible_heuristic(&next) > depth {
                continue;
            }
            path.push(mv);
            *nodes_visited += 1;
            if space.is_goal(&next) {
                return true;
            }

            stack.push(Frame {
                state: next,
                next_move: 0,
            });
        }

        false
    }
}

impl ShortestPath for IterativeDeepening {
    fn shortest_path<S: SearchSpace>(
        &self,
        space: &S,
        start: S::State,
        max_depth: usize,
    ) -> Option<Vec<S::Move>> {
        let mut path = Vec::with_capacity(max_depth);

        // no solution is shorter than the heuristic
        for depth in space.admissible_heuristic(&start)..=max_depth {
            debug!("Searching depth {depth}...");
            let depth_start = Instant::now();
            let mut nodes_visited = 0;

            let found = Self::search_depth(space, start, depth, &mut path, &mut nodes_visited);
            debug!(
                "Traversed {nodes_visited} nodes in {:.3}s",
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                return Some(path);
            }
        }

        None
    }
}

/// Bidirectional breadth-first search.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeetInTheMiddle;

/// One side of the bidirectional search.
///
/// Every discovered state maps to its distance from the root and the link
/// back towards the root: the neighbouring state and the move joining them.
struct Frontier<S, M> {
    parents: FxHashMap<S, (usize, Option<(S, M)>)>,
    layer: Vec<S>,
    depth: usize,
}

impl<S: Copy + Eq + Hash, M: Copy> Frontier<S, M> {
    fn new(root: S) -> Self {
        let mut parents = FxHashMap::default();
        parents.insert(root, (0, None));
        Self {
            parents,
            layer: vec![root],
            depth: 0,
        }
    }

    /// Discovers the next layer. `step` maps a state and a move to the
    /// neighbour and the move stored as its link.
    ///
    /// Returns the new state closest to the other side's root if the two
    /// searches touched.
    fn expand(
        &mut self,
        moves: &[M],
        step: impl Fn(&S, M) -> (S, M),
        other: &Frontier<S, M>,
    ) -> Option<S> {
        let mut meeting: Option<(usize, S)> = None;
        let mut next_layer = Vec::new();

        for state in std::mem::take(&mut self.layer) {
            for &mv in moves {
                let (next, link) = step(&state, mv);
                if self.parents.contains_key(&next) {
                    continue;
                }
                self.parents
                    .insert(next, (self.depth + 1, Some((state, link))));
                next_layer.push(next);

                if let Some(&(other_depth, _)) = other.parents.get(&next) {
                    if meeting.map_or(true, |(best, _)| other_depth < best) {
                        meeting = Some((other_depth, next));
                    }
                }
            }
        }

        self.depth += 1;
        self.layer = next_layer;
        meeting.map(|(_, state)| state)
    }

    /// Links followed from `state` back to the root, in walking order.
    fn links_to_root(&self, mut state: S) -> Vec<M> {
        let mut links = Vec::with_capacity(self.depth);
        while let Some(&(_, Some((parent, mv)))) = self.parents.get(&state) {
            links.push(mv);
            state = parent;
        }
        links
    }
}

impl ShortestPath for MeetInTheMiddle {
    fn shortest_path<S: SearchSpace>(
        &self,
        space: &S,
        start: S::State,
        max_depth: usize,
    ) -> Option<Vec<S::Move>> {
        if space.is_goal(&start) {
            return Some(Vec::new());
        }

        let moves = space.moves();
        // forward links are `parent --mv--> state`, backward links are
        // `state --mv--> parent`
        let mut forward: Frontier<S::State, S::Move> = Frontier::new(start);
        let mut backward: Frontier<S::State, S::Move> = Frontier::new(space.goal());

        while forward.depth + backward.depth < max_depth {
            if forward.layer.is_empty() || backward.layer.is_empty() {
                break;
            }

            let layer_start = Instant::now();
            let meeting = if forward.layer.len() <= backward.layer.len() {
                forward.expand(moves, |state, mv| (space.apply(state, mv), mv), &backward)
            } else {
                backward.expand(
                    moves,
                    |state, mv| (space.apply(state, space.inverse(mv)), mv),
                    &forward,
                )
            };
            debug!(
                "Expanded to depths {}+{} ({} + {} states) in {:.3}s",
                forward.depth,
                backward.depth,
                forward.parents.len(),
                backward.parents.len(),
                layer_start.elapsed().as_secs_f64()
            );

            if let Some(state) = meeting {
                let mut path = forward.links_to_root(state);
                path.reverse();
                path.extend(backward.links_to_root(state));
                return Some(path);
            }
        }

        None
    }
}

/// Search strategy selectable at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchStrategy {
    /// Iterative deepening depth-first search.
    #[default]
    Iddfs,
    /// Breadth-first search from both ends.
    Bidirectional,
}

impl ShortestPath for SearchStrategy {
    fn shortest_path<S: SearchSpace>(
        &self,
        space: &S,
        start: S::State,
        max_depth: usize,
    ) -> Option<Vec<S::Move>> {
        match self {
            SearchStrategy::Iddfs => IterativeDeepening.shortest_path(space, start, max_depth),
            SearchStrategy::Bidirectional => {
                MeetInTheMiddle.shortest_path(space, start, max_depth)
            }
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Iddfs => f.write_str("iddfs"),
            SearchStrategy::Bidirectional => f.write_str("bidirectional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integers modulo 100 with additive steps; the goal is zero.
    struct Ring {
        steps: Vec<i8>,
    }

    impl SearchSpace for Ring {
        type State = u8;
        type Move = i8;

        fn moves(&self) -> &[i8] {
            &self.steps
        }

        fn apply(&self, state: &u8, mv: i8) -> u8 {
            (*state as i16 + mv as i16).rem_euclid(100) as u8
        }

        fn goal(&self) -> u8 {
            0
        }

        fn inverse(&self, mv: i8) -> i8 {
            -mv
        }

        fn is_redundant(&self, path: &[i8], next: i8) -> bool {
            path.last() == Some(&-next)
        }
    }

    fn ring() -> Ring {
        Ring {
            steps: vec![1, 5, -1, -5],
        }
    }

    fn walk(space: &Ring, start: u8, path: &[i8]) -> u8 {
        path.iter().fold(start, |state, &mv| space.apply(&state, mv))
    }

    #[test]
    fn test_start_at_goal_needs_no_moves() {
        for strategy in [SearchStrategy::Iddfs, SearchStrategy::Bidirectional] {
            assert_eq!(strategy.shortest_path(&ring(), 0, 0), Some(vec![]));
        }
    }

    #[test]
    fn test_iddfs_returns_first_path_in_move_order() {
        // 88 + 12 = 100: two +1 steps come before two +5 steps
        let path = IterativeDeepening.shortest_path(&ring(), 88, 10);
        assert_eq!(path, Some(vec![1, 1, 5, 5]));
    }

    #[test]
    fn test_bidirectional_finds_shortest_length() {
        let space = ring();
        for start in [88, 12, 50, 3, 97] {
            let expected = IterativeDeepening
                .shortest_path(&space, start, 20)
                .unwrap()
                .len();
            let path = MeetInTheMiddle.shortest_path(&space, start, 20).unwrap();
            assert_eq!(path.len(), expected, "start {start}");
            assert_eq!(walk(&space, start, &path), 0, "start {start}");
        }
    }

    #[test]
    fn test_depth_bound_is_respected() {
        for strategy in [SearchStrategy::Iddfs, SearchStrategy::Bidirectional] {
            assert_eq!(strategy.shortest_path(&ring(), 88, 3), None, "{strategy}");
            assert_eq!(strategy.shortest_path(&ring(), 88, 4).map(|p| p.len()), Some(4));
        }
    }

    /// The ring with a lower bound: every step covers at most 5.
    struct GuidedRing(Ring);

    impl SearchSpace for GuidedRing {
        type State = u8;
        type Move = i8;

        fn moves(&self) -> &[i8] {
            self.0.moves()
        }

        fn apply(&self, state: &u8, mv: i8) -> u8 {
            self.0.apply(state, mv)
        }

        fn goal(&self) -> u8 {
            0
        }

        fn inverse(&self, mv: i8) -> i8 {
            -mv
        }

        fn is_redundant(&self, path: &[i8], next: i8) -> bool {
            self.0.is_redundant(path, next)
        }

        fn admissible_heuristic(&self, state: &u8) -> usize {
            let distance = (*state).min(100 - *state) as usize;
            distance.div_ceil(5)
        }
    }

    #[test]
    fn test_heuristic_keeps_first_path() {
        let guided = GuidedRing(ring());
        for start in [88, 12, 50, 3, 97] {
            assert_eq!(
                IterativeDeepening.shortest_path(&guided, start, 20),
                IterativeDeepening.shortest_path(&guided.0, start, 20),
                "start {start}"
            );
        }
        // 12 away needs four steps, the heuristic only promises three
        assert_eq!(IterativeDeepening.shortest_path(&guided, 88, 3), None);
    }

    #[test]
    fn test_unreachable_goal() {
        let evens = Ring { steps: vec![2, -2] };
        assert_eq!(IterativeDeepening.shortest_path(&evens, 1, 6), None);
        // the frontiers run dry long before the bound
        assert_eq!(MeetInTheMiddle.shortest_path(&evens, 1, 1000), None);
    }
}
