use crate::prelude::*;

use smallvec::SmallVec;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest bound the search may reach before giving up.
    pub max_depth: u8,
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 20,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Vec<Move>),
    /// A pass failed and the next bound would pass `max_depth`. `None` when
    /// nothing was pruned.
    DepthExceeded { next_bound: Option<u32> },
    IterationsExhausted { bound: u32 },
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    pub fn solution(&self) -> Option<&[Move]> {
        match &self.outcome {
            Outcome::Solved(moves) => Some(moves),
            _ => None,
        }
    }
}

type MoveStack = SmallVec<[Move; 24]>;

enum Search {
    Found,
    NotFound(Option<u32>),
}

/// Iterative-deepening A*: depth-first passes bounded by `g + h`, each pass
/// raising the bound to the smallest `g + h` it pruned.
pub struct IdaStar<'h, H: Heuristic + ?Sized> {
    heuristic: &'h H,
    config: SearchConfig,
}

impl<'h, H: Heuristic + ?Sized> IdaStar<'h, H> {
    pub fn new(heuristic: &'h H, config: SearchConfig) -> Self {
        IdaStar { heuristic, config }
    }

    pub fn solve(&self, cube: &CubeState) -> SearchReport {
        let start = Instant::now();
        let mut nodes = 0;
        let outcome = self.iterate(cube, &mut nodes);
        let elapsed = start.elapsed();

        match &outcome {
            Outcome::Solved(moves) => log::info!(
                "Found {}-move solution, {} nodes, took {:?}",
                moves.len(),
                nodes,
                elapsed
            ),
            other => log::info!("No solution: {:?}, {} nodes, took {:?}", other, nodes, elapsed),
        }

        SearchReport {
            outcome,
            nodes,
            elapsed,
        }
    }

    fn iterate(&self, cube: &CubeState, nodes: &mut u64) -> Outcome {
        if cube.is_solved() {
            return Outcome::Solved(Vec::new());
        }

        let max_depth = u32::from(self.config.max_depth);
        let mut bound = u32::from(self.heuristic.estimate(cube));
        let mut move_stack = MoveStack::new();

        let mut iteration = 0;
        loop {
            if iteration == self.config.max_iterations {
                return Outcome::IterationsExhausted { bound };
            }

            log::debug!(
                "Iteration {}: searching <= {}, {} nodes so far",
                iteration,
                bound,
                nodes
            );
            match self.search(cube, 0, bound, &mut move_stack, nodes) {
                Search::Found => return Outcome::Solved(move_stack.into_vec()),
                Search::NotFound(None) => return Outcome::DepthExceeded { next_bound: None },
                Search::NotFound(Some(next)) if next > max_depth => {
                    return Outcome::DepthExceeded {
                        next_bound: Some(next),
                    }
                }
                Search::NotFound(Some(next)) => bound = next,
            }
            iteration += 1;
        }
    }

    fn search(
        &self,
        cube: &CubeState,
        cost: u32,
        bound: u32,
        move_stack: &mut MoveStack,
        nodes: &mut u64,
    ) -> Search {
        *nodes += 1;

        let estimate = cost + u32::from(self.heuristic.estimate(cube));
        if estimate > bound {
            return Search::NotFound(Some(estimate));
        }
        if cube.is_solved() {
            return Search::Found;
        }

        let last_move = move_stack.last().copied();
        let mut next_bound = None;
        for move_ in Move::all().filter(|move_| match last_move {
            None => true,
            Some(m) => move_.could_follow(&m),
        }) {
            move_stack.push(move_);
            match self.search(&cube.apply(move_), cost + 1, bound, move_stack, nodes) {
                Search::Found => return Search::Found,
                Search::NotFound(sub) => {
                    next_bound = match (next_bound, sub) {
                        (Some(a), Some(b)) => Some(core::cmp::min(a, b)),
                        (a, b) => a.or(b),
                    };
                }
            }
            move_stack.pop();
        }
        Search::NotFound(next_bound)
    }
}
