//! Dense integer coordinates for parts of a cube.
//!
//! These are the indices the pattern databases are keyed by. The builder and
//! the heuristic both go through this module, so any change here invalidates
//! every table on disk.

use crate::prelude::*;

use smallvec::SmallVec;

pub const CORNER_PERMUTATIONS: usize = 40_320;
pub const CORNER_TWISTS: usize = 2_187;
pub const CORNER_STATES: usize = CORNER_PERMUTATIONS * CORNER_TWISTS;

pub const SUBSET_PERMUTATIONS: usize = 720;
pub const SUBSET_FLIPS: usize = 32;
pub const EDGE_SUBSET_STATES: usize = SUBSET_PERMUTATIONS * SUBSET_FLIPS;

const FACTORIAL: [usize; 13] = [
    1, 1, 2, 6, 24, 120, 720, 5040, 40320, 362880, 3628800, 39916800, 479001600,
];

/// Lehmer-code rank of a sequence of distinct labels, in `[0, len!)`.
///
/// Only the relative order of the labels matters, so any six distinct edge
/// labels rank the same as their re-labelling onto `0..6`.
pub fn permutation_rank(perm: &[u8]) -> usize {
    let n = perm.len();
    perm.iter().enumerate().fold(0, |index, (i, &label)| {
        let smaller = perm[i + 1..].iter().filter(|&&other| other < label).count();
        index + smaller * FACTORIAL[n - 1 - i]
    })
}

/// Inverse of [`permutation_rank`] onto permutations of `0..N`.
pub fn permutation_unrank<const N: usize>(mut rank: usize) -> [u8; N] {
    let mut unused: SmallVec<[u8; 12]> = (0..N as u8).collect();
    let mut perm = [0; N];
    for (i, slot) in perm.iter_mut().enumerate() {
        let weight = FACTORIAL[N - 1 - i];
        *slot = unused.remove(rank / weight);
        rank %= weight;
    }
    perm
}

pub fn corner_position(cube: &CubeState) -> usize {
    permutation_rank(&cube.cp)
}

/// The first seven twists as base-3 digits, most significant first. The last
/// twist is implied by the twist sum.
pub fn corner_orientation(cube: &CubeState) -> usize {
    cube.co[..7]
        .iter()
        .fold(0, |v, &twist| v * 3 + twist as usize)
}

pub fn corner_index(cube: &CubeState) -> usize {
    corner_position(cube) * CORNER_TWISTS + corner_orientation(cube)
}

/// A representative state for a corner index: corners decoded, edges solved.
pub fn corner_state(index: usize) -> CubeState {
    let mut cube = CubeState::SOLVED;
    cube.cp = permutation_unrank(index / CORNER_TWISTS);

    let mut twists = index % CORNER_TWISTS;
    for i in (0..7).rev() {
        cube.co[i] = (twists % 3) as u8;
        twists /= 3;
    }
    cube.co[7] = (3 - cube.co[..7].iter().sum::<u8>() % 3) % 3;
    cube
}

/// Six edge slots whose contents make up one edge pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSubset(pub [u8; 6]);

impl EdgeSubset {
    pub const A: EdgeSubset = EdgeSubset([0, 1, 2, 3, 4, 5]);
    pub const B: EdgeSubset = EdgeSubset([6, 7, 8, 9, 10, 11]);
}

/// Index of the labels and flips found in `subset`'s slots, in
/// `[0, EDGE_SUBSET_STATES)`: the rank of the labels' relative order times 32
/// plus the first five flips as bits, most significant first.
pub fn edge_subset_index(cube: &CubeState, subset: &EdgeSubset) -> usize {
    let labels = subset.0.map(|slot| cube.ep[slot as usize]);
    let bits = subset.0[..5]
        .iter()
        .fold(0, |v, &slot| v * 2 + cube.eo[slot as usize] as usize);
    permutation_rank(&labels) * SUBSET_FLIPS + bits
}

/// The slots and flips of a fixed set of edge pieces, wherever they are.
///
/// Unlike [`edge_subset_index`], which looks at fixed slots, this follows
/// pieces, so a move maps each value to exactly one successor value. That is
/// what makes a breadth-first search over it exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEdges {
    pieces: SmallVec<[u8; 12]>,
}

impl TrackedEdges {
    /// `None` unless `pieces` are distinct edge labels.
    pub fn new(pieces: &[u8]) -> Option<TrackedEdges> {
        let distinct = pieces
            .iter()
            .enumerate()
            .all(|(i, p)| *p < 12 && !pieces[..i].contains(p));
        distinct.then(|| TrackedEdges {
            pieces: pieces.iter().copied().collect(),
        })
    }

    /// Tracks the pieces that belong in `subset`'s slots.
    pub fn subset(subset: &EdgeSubset) -> TrackedEdges {
        TrackedEdges {
            pieces: subset.0.iter().copied().collect(),
        }
    }

    fn arrangements(&self) -> usize {
        (0..self.pieces.len()).map(|k| 12 - k).product()
    }

    /// Slot of every tracked piece, from the mixed-radix arrangement digits.
    fn slots(&self, mut arrangement: usize) -> SmallVec<[u8; 12]> {
        let n = self.pieces.len();
        let mut digits: SmallVec<[usize; 12]> = SmallVec::from_elem(0, n);
        for k in (0..n).rev() {
            digits[k] = arrangement % (12 - k);
            arrangement /= 12 - k;
        }

        let mut free: SmallVec<[u8; 12]> = (0..12).collect();
        digits.into_iter().map(|d| free.remove(d)).collect()
    }

    /// Folds a six-piece value onto the [`edge_subset_index`] space.
    ///
    /// The pieces of a subset in state `q` sit exactly where the labels in the
    /// subset's slots of `q.inverse()` point, with the same flips. So
    /// `fold(index(q)) == edge_subset_index(q.inverse(), subset)`.
    pub fn fold(&self, index: usize) -> usize {
        assert_eq!(self.pieces.len(), 6, "only six-piece patterns fold");
        let slots = self.slots(index >> 6);
        let bits = (index & 0b11_1111) >> 1;
        permutation_rank(&slots) * SUBSET_FLIPS + bits
    }
}

/// A dense coordinate over some part of the cube, suitable for a
/// breadth-first table build.
pub trait Coordinate {
    fn name(&self) -> &str;

    fn count(&self) -> usize;

    fn index(&self, cube: &CubeState) -> usize;

    /// Any state whose index is `index`.
    fn state(&self, index: usize) -> CubeState;

    /// Invariants every reachable state keeps but `index` does not encode.
    fn respects_invariants(&self, _cube: &CubeState) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Corners;

impl Coordinate for Corners {
    fn name(&self) -> &str {
        "corners"
    }

    fn count(&self) -> usize {
        CORNER_STATES
    }

    fn index(&self, cube: &CubeState) -> usize {
        corner_index(cube)
    }

    fn state(&self, index: usize) -> CubeState {
        corner_state(index)
    }

    fn respects_invariants(&self, cube: &CubeState) -> bool {
        cube.twist_sum() == 0
    }
}

impl Coordinate for TrackedEdges {
    fn name(&self) -> &str {
        "tracked_edges"
    }

    fn count(&self) -> usize {
        self.arrangements() << self.pieces.len()
    }

    fn index(&self, cube: &CubeState) -> usize {
        let mut slot_of = [0u8; 12];
        for (slot, &label) in cube.ep.iter().enumerate() {
            slot_of[label as usize] = slot as u8;
        }

        let mut arrangement = 0;
        let mut bits = 0;
        for (k, &piece) in self.pieces.iter().enumerate() {
            let slot = slot_of[piece as usize];
            let taken_below = self.pieces[..k]
                .iter()
                .filter(|&&earlier| slot_of[earlier as usize] < slot)
                .count();
            arrangement = arrangement * (12 - k) + slot as usize - taken_below;
            bits = bits * 2 + cube.eo[slot as usize] as usize;
        }
        (arrangement << self.pieces.len()) | bits
    }

    fn state(&self, index: usize) -> CubeState {
        let n = self.pieces.len();
        let slots = self.slots(index >> n);

        let mut cube = CubeState::SOLVED;
        let mut filled = [false; 12];
        for (k, (&piece, &slot)) in self.pieces.iter().zip(&slots).enumerate() {
            cube.ep[slot as usize] = piece;
            cube.eo[slot as usize] = ((index >> (n - 1 - k)) & 1) as u8;
            filled[slot as usize] = true;
        }

        let mut untracked = (0..12).filter(|label| !self.pieces.contains(label));
        for slot in (0..12).filter(|&slot| !filled[slot]) {
            if let Some(label) = untracked.next() {
                cube.ep[slot] = label;
                cube.eo[slot] = 0;
            }
        }
        cube
    }
}
