use super::*;

use std::{collections::VecDeque, time::Instant};

/// Builds the complete table for `kind`.
pub fn build(kind: PatternKind) -> Result<PatternDatabase, PatternError> {
    let table = match kind.subset() {
        None => breadth_first(&Corners)?,
        Some(subset) => {
            let table = exact_subset_table(&subset)?;
            let first = first_discovery(&subset);
            let overestimated = table
                .iter()
                .zip(&first)
                .filter(|(exact, first)| first > exact)
                .count();
            log::info!(
                "{}: first discovery over-estimates {} of {} entries",
                kind,
                overestimated,
                table.len()
            );
            table
        }
    };
    PatternDatabase::from_bytes(kind, table)
}

/// Distance from solved of every value of `coord`, by breadth-first search.
///
/// The frontier is never stored: layer `d + 1` comes from scanning the table
/// for entries equal to `d` and decoding each back into a state, so peak
/// memory is the table itself.
pub fn breadth_first<C: Coordinate>(coord: &C) -> Result<Vec<u8>, PatternError> {
    let name = coord.name();
    let start = Instant::now();
    log::info!("Populating {} table, {} entries", name, coord.count());

    let mut table = vec![UNVISITED; coord.count()];
    let solved = coord.index(&CubeState::solved());
    *entry(&mut table, name, solved)? = 0;

    let mut depth = 0u8;
    let mut layer = 1usize;
    while layer > 0 {
        log::info!(
            "{}: depth {}, {} states, {:?} elapsed",
            name,
            depth,
            layer,
            start.elapsed()
        );
        let next = depth
            .checked_add(1)
            .filter(|&d| d < UNVISITED)
            .ok_or_else(|| PatternError::TooDeep {
                name: name.to_string(),
            })?;

        layer = 0;
        for index in 0..table.len() {
            if table[index] != depth {
                continue;
            }

            let cube = coord.state(index);
            let reencoded = coord.index(&cube);
            if reencoded != index {
                return Err(PatternError::Inconsistent {
                    name: name.to_string(),
                    index,
                    reencoded,
                });
            }

            for move_ in Move::all() {
                let to = cube.apply(move_);
                if !coord.respects_invariants(&to) {
                    return Err(PatternError::InvariantViolated {
                        name: name.to_string(),
                        index,
                    });
                }

                let distance = entry(&mut table, name, coord.index(&to))?;
                if *distance == UNVISITED {
                    *distance = next;
                    layer += 1;
                }
            }
        }
        depth = next;
    }

    let unreached = table.iter().filter(|&&d| d == UNVISITED).count();
    if unreached > 0 {
        return Err(PatternError::Incomplete {
            name: name.to_string(),
            unreached,
        });
    }

    log::info!(
        "Finished populating {} table, max depth {}, took {:?}",
        name,
        depth - 1,
        start.elapsed()
    );
    Ok(table)
}

fn entry<'t>(table: &'t mut [u8], name: &str, index: usize) -> Result<&'t mut u8, PatternError> {
    let count = table.len();
    table
        .get_mut(index)
        .ok_or_else(|| PatternError::IndexOutOfRange {
            name: name.to_string(),
            index,
            count,
        })
}

/// The exact [`edge_subset_index`] table for `subset`: each entry is the
/// fewest moves that solve any state with that index.
///
/// The subset index of `s` is the fold of the tracked-piece index of
/// `s.inverse()`, and a state and its inverse are equally far from solved, so
/// each entry is the minimum tracked-piece distance over the values folding
/// onto it.
pub fn exact_subset_table(subset: &EdgeSubset) -> Result<Vec<u8>, PatternError> {
    let tracked = TrackedEdges::subset(subset);
    let distances = breadth_first(&tracked)?;
    let table = fold_minimum(&tracked, distances.into_iter().enumerate());

    let unreached = table.iter().filter(|&&d| d == UNVISITED).count();
    if unreached > 0 {
        return Err(PatternError::Incomplete {
            name: format!("{:?}", subset),
            unreached,
        });
    }
    Ok(table)
}

/// Folds `(tracked index, distance)` pairs onto the edge-subset index space,
/// keeping the smallest distance per entry. Entries nothing folds onto stay
/// [`UNVISITED`].
pub fn fold_minimum(
    tracked: &TrackedEdges,
    distances: impl IntoIterator<Item = (usize, u8)>,
) -> Vec<u8> {
    let mut table = vec![UNVISITED; EDGE_SUBSET_STATES];
    for (index, distance) in distances {
        let folded = &mut table[tracked.fold(index)];
        *folded = (*folded).min(distance);
    }
    table
}

/// Breadth-first search directly over the slots of `subset`, keeping the first
/// state found for each index.
///
/// States sharing a slot-subset index do not share successors, so the first
/// state found for an index need not be the closest one and an entry can
/// exceed the true distance. Kept to measure that against
/// [`exact_subset_table`].
pub fn first_discovery(subset: &EdgeSubset) -> Vec<u8> {
    let mut table = vec![UNVISITED; EDGE_SUBSET_STATES];
    table[edge_subset_index(&CubeState::solved(), subset)] = 0;

    let mut to_expand = VecDeque::new();
    to_expand.push_back((CubeState::solved(), 0u8));

    while let Some((from, depth)) = to_expand.pop_front() {
        for move_ in Move::all() {
            let to = from.apply(move_);
            let index = edge_subset_index(&to, subset);
            if table[index] == UNVISITED {
                table[index] = depth + 1;
                to_expand.push_back((to, depth + 1));
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken {
        decodes_wrong: bool,
        out_of_range: bool,
    }

    impl Coordinate for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn count(&self) -> usize {
            CORNER_PERMUTATIONS
        }

        fn index(&self, cube: &CubeState) -> usize {
            let index = corner_position(cube);
            match (self.out_of_range, index) {
                (true, 0) => 0,
                (true, _) => CORNER_PERMUTATIONS + index,
                (false, _) => index,
            }
        }

        fn state(&self, index: usize) -> CubeState {
            let mut cube = CubeState::solved();
            cube.cp = permutation_unrank(index);
            if self.decodes_wrong && index > 0 {
                cube.cp.swap(0, 1);
            }
            cube
        }
    }

    struct NoTwist;

    impl Coordinate for NoTwist {
        fn name(&self) -> &str {
            "no_twist"
        }

        fn count(&self) -> usize {
            CORNER_PERMUTATIONS
        }

        fn index(&self, cube: &CubeState) -> usize {
            corner_position(cube)
        }

        fn state(&self, index: usize) -> CubeState {
            let mut cube = CubeState::solved();
            cube.cp = permutation_unrank(index);
            cube
        }

        fn respects_invariants(&self, cube: &CubeState) -> bool {
            cube.co.iter().all(|&twist| twist == 0)
        }
    }

    #[test]
    fn single_edge_distances() {
        let tracked = TrackedEdges::new(&[0]).unwrap();
        let table = breadth_first(&tracked).unwrap();

        assert_eq!(table.len(), 24);
        assert_eq!(table[0], 0);
        // U, U', U2, R, R', R2 each move the UR edge somewhere new, unflipped.
        assert_eq!(table.iter().filter(|&&d| d == 1).count(), 6);
        assert!(table.iter().all(|&d| d <= 3));
    }

    #[test]
    fn corner_permutation_table_is_complete() {
        let table = breadth_first(&Broken {
            decodes_wrong: false,
            out_of_range: false,
        })
        .unwrap();

        assert_eq!(table[0], 0);
        assert!(table.iter().all(|&d| d < UNVISITED));
        assert_eq!(table[corner_position(&cube_with_moves("U"))], 1);
        assert_eq!(table[corner_position(&cube_with_moves("R2 F"))], 2);
    }

    #[test]
    fn tracked_table_is_admissible() {
        let tracked = TrackedEdges::new(&[1, 6, 10]).unwrap();
        let table = breadth_first(&tracked).unwrap();

        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            assert!(table[tracked.index(cube)] <= distance);
        }
    }

    #[test]
    fn tracked_table_matches_distance_of_its_states() {
        let tracked = TrackedEdges::new(&[4, 8]).unwrap();
        let table = breadth_first(&tracked).unwrap();

        // Every state within KNOWN_DISTANCES' radius is listed, so the closest
        // listed state of a value is its closest state overall.
        let mut closest = vec![UNVISITED; tracked.count()];
        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            let index = tracked.index(cube);
            closest[index] = closest[index].min(distance);
        }
        for (index, &best) in closest.iter().enumerate() {
            if best != UNVISITED {
                assert_eq!(table[index], best, "index {}", index);
            }
        }
    }

    #[test]
    fn decoding_mismatch_is_reported() {
        let err = breadth_first(&Broken {
            decodes_wrong: true,
            out_of_range: false,
        })
        .unwrap_err();
        assert!(matches!(err, PatternError::Inconsistent { .. }));
    }

    #[test]
    fn index_past_table_is_reported() {
        let err = breadth_first(&Broken {
            decodes_wrong: false,
            out_of_range: true,
        })
        .unwrap_err();
        assert!(matches!(err, PatternError::IndexOutOfRange { .. }));
    }

    #[test]
    fn broken_invariant_is_reported() {
        let err = breadth_first(&NoTwist).unwrap_err();
        assert!(matches!(err, PatternError::InvariantViolated { index: 0, .. }));
    }

    #[test]
    fn fold_keeps_smallest_distance() {
        let tracked = TrackedEdges::subset(&EdgeSubset::A);
        let cube = cube_with_moves("R F");
        let index = tracked.index(&cube.inverse());

        // The last tracked piece's flip is the lowest bit, which folding drops.
        let table = fold_minimum(&tracked, [(index, 5), (index ^ 1, 2), (0, 0)]);

        assert_eq!(tracked.fold(index), tracked.fold(index ^ 1));
        assert_eq!(table[edge_subset_index(&cube, &EdgeSubset::A)], 2);
        assert_eq!(table[0], 0);
        assert_eq!(table.iter().filter(|&&d| d != UNVISITED).count(), 2);
    }

    #[test]
    fn fold_of_small_exact_search_is_admissible() {
        let tracked = TrackedEdges::subset(&EdgeSubset::B);
        let distances = KNOWN_DISTANCES
            .iter()
            .map(|(cube, &distance)| (tracked.index(&cube.inverse()), distance));
        let table = fold_minimum(&tracked, distances);

        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            let entry = table[edge_subset_index(cube, &EdgeSubset::B)];
            assert!(entry <= distance, "{:?}", cube);
        }
        assert_eq!(table[0], 0);
    }

    #[test]
    fn first_discovery_starts_at_solved() {
        for subset in [EdgeSubset::A, EdgeSubset::B] {
            let table = first_discovery(&subset);
            assert_eq!(table[0], 0);
            assert_eq!(table[edge_subset_index(&cube_with_moves("F"), &subset)], 1);
            assert!(table.iter().filter(|&&d| d != UNVISITED).all(|&d| d < 20));
        }
    }

    #[test]
    #[ignore = "builds the 88M-entry corner table; run with --release -- --ignored"]
    fn corner_table_is_complete() {
        let db = build(PatternKind::Corners).unwrap();
        assert_eq!(db.as_bytes().len(), CORNER_STATES);
        assert_eq!(db.as_bytes()[0], 0);
        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            assert!(db.lookup(cube) <= distance);
        }
    }

    #[test]
    #[ignore = "searches 42M tracked-edge values per subset; run with --release -- --ignored"]
    fn edge_tables_are_complete_and_below_first_discovery() {
        for kind in [PatternKind::EdgesA, PatternKind::EdgesB] {
            let db = build(kind).unwrap();
            let subset = kind.subset().unwrap();
            let first = first_discovery(&subset);

            assert_eq!(db.as_bytes().len(), EDGE_SUBSET_STATES);
            assert!(db.as_bytes().iter().zip(&first).all(|(exact, first)| exact <= first));
            for (cube, &distance) in KNOWN_DISTANCES.iter() {
                assert!(db.lookup(cube) <= distance);
            }
        }
    }
}
