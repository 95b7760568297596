use crate::prelude::*;

use rand::Rng;

/// `count` moves picked uniformly from all 18, with no restriction on which
/// move may follow which.
pub fn random_moves(rng: &mut impl Rng, count: usize) -> Vec<Move> {
    (0..count)
        .filter_map(|_| Move::from_index(rng.gen_range(0, MOVE_COUNT)))
        .collect()
}
