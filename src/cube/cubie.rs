use crate::prelude::*;

/// A cube configuration at the cubie level.
///
/// Slot `i` holds the corner labelled `cp[i]` twisted by `co[i]` (mod 3) and
/// the edge labelled `ep[i]` flipped by `eo[i]` (mod 2). A state doubles as a
/// transformation: composing with it moves the cubie at slot `cp[i]` into
/// slot `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub cp: [u8; 8],
    pub co: [u8; 8],
    pub ep: [u8; 12],
    pub eo: [u8; 12],
}

impl CubeState {
    pub const SOLVED: CubeState = CubeState {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    /// Applies `other` after `self`.
    pub fn compose(&self, other: &CubeState) -> CubeState {
        let mut result = CubeState::SOLVED;
        for i in 0..8 {
            let from = other.cp[i] as usize;
            result.cp[i] = self.cp[from];
            result.co[i] = (self.co[from] + other.co[i]) % 3;
        }
        for i in 0..12 {
            let from = other.ep[i] as usize;
            result.ep[i] = self.ep[from];
            result.eo[i] = (self.eo[from] + other.eo[i]) % 2;
        }
        result
    }

    /// The transformation that undoes `self`: `self.compose(&self.inverse())`
    /// is solved.
    pub fn inverse(&self) -> CubeState {
        let mut result = CubeState::SOLVED;
        for i in 0..8 {
            let to = self.cp[i] as usize;
            result.cp[to] = i as u8;
            result.co[to] = (3 - self.co[i]) % 3;
        }
        for i in 0..12 {
            let to = self.ep[i] as usize;
            result.ep[to] = i as u8;
            result.eo[to] = self.eo[i];
        }
        result
    }

    /// Total corner twist mod 3. Zero for every state reachable from solved.
    pub fn twist_sum(&self) -> u8 {
        self.co.iter().sum::<u8>() % 3
    }

    /// Total edge flip mod 2. Zero for every state reachable from solved.
    pub fn flip_sum(&self) -> u8 {
        self.eo.iter().sum::<u8>() % 2
    }

    /// Edges that are in the wrong slot or flipped.
    pub fn misplaced_edges(&self) -> usize {
        self.ep
            .iter()
            .zip(&self.eo)
            .enumerate()
            .filter(|&(slot, (&label, &flip))| label as usize != slot || flip != 0)
            .count()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::SOLVED
    }
}

impl CubeLike for CubeState {
    fn solved() -> Self {
        CubeState::SOLVED
    }

    fn apply(self, move_: Move) -> Self {
        self.compose(move_.transformation())
    }
}
