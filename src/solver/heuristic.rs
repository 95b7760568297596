use crate::pattern::{io, PatternDatabase, PatternKind};
use crate::prelude::*;

use std::path::Path;

/// Lower bound on the number of moves needed to solve a cube.
pub trait Heuristic: Sync + Send {
    fn estimate(&self, cube: &CubeState) -> u8;
}

/// A quarter or half turn moves at most four edges, so a quarter of the
/// misplaced edges, rounded up, is never more than the distance.
pub struct MisplacedEdges;

impl Heuristic for MisplacedEdges {
    fn estimate(&self, cube: &CubeState) -> u8 {
        let misplaced = cube.misplaced_edges() as u8;
        (misplaced + 3) / 4
    }
}

/// Whichever pattern databases are available, combined by taking the largest
/// lookup.
#[derive(Debug, Default)]
pub struct PatternSet {
    corners: Option<PatternDatabase>,
    edges_a: Option<PatternDatabase>,
    edges_b: Option<PatternDatabase>,
}

impl PatternSet {
    /// Loads `corners.bin`, `edges_a.bin` and `edges_b.bin` from `dir`. Tables
    /// that are missing or unreadable are left out.
    pub fn load_dir(dir: &Path) -> PatternSet {
        let mut set = PatternSet::default();
        for kind in enum_iterator::all::<PatternKind>() {
            let path = dir.join(kind.file_name());
            match io::load(kind, &path) {
                Ok(db) => {
                    log::info!(
                        "Loaded {} table from {}, max distance {}",
                        kind,
                        path.display(),
                        db.max_distance()
                    );
                    set.insert(db);
                }
                Err(e) => log::warn!("Skipping {} table: {}", kind, e),
            }
        }
        if set.is_empty() {
            log::warn!("No pattern databases loaded, estimating from misplaced edges");
        }
        set
    }

    pub fn insert(&mut self, db: PatternDatabase) {
        let kind = db.kind();
        *self.slot(kind) = Some(db);
    }

    pub fn get(&self, kind: PatternKind) -> Option<&PatternDatabase> {
        match kind {
            PatternKind::Corners => self.corners.as_ref(),
            PatternKind::EdgesA => self.edges_a.as_ref(),
            PatternKind::EdgesB => self.edges_b.as_ref(),
        }
    }

    pub fn loaded(&self) -> impl Iterator<Item = &PatternDatabase> {
        [&self.corners, &self.edges_a, &self.edges_b]
            .into_iter()
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded().next().is_none()
    }

    fn slot(&mut self, kind: PatternKind) -> &mut Option<PatternDatabase> {
        match kind {
            PatternKind::Corners => &mut self.corners,
            PatternKind::EdgesA => &mut self.edges_a,
            PatternKind::EdgesB => &mut self.edges_b,
        }
    }
}

impl Heuristic for PatternSet {
    fn estimate(&self, cube: &CubeState) -> u8 {
        match self.loaded().map(|db| db.lookup(cube)).max().unwrap_or(0) {
            0 => MisplacedEdges.estimate(cube),
            best => best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misplaced_edges_rounds_up() {
        assert_eq!(MisplacedEdges.estimate(&CubeState::solved()), 0);
        assert_eq!(MisplacedEdges.estimate(&cube_with_moves("U")), 1);
        assert_eq!(MisplacedEdges.estimate(&cube_with_moves("U R")), 2);
    }

    #[test]
    fn misplaced_edges_is_admissible() {
        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            assert!(MisplacedEdges.estimate(cube) <= distance, "{:?}", cube);
        }
    }

    #[test]
    fn empty_set_falls_back_to_misplaced_edges() {
        let set = PatternSet::default();
        assert!(set.is_empty());
        for moves in ["", "F", "R U", "R2 U' L' R2 B2 F' L F2"] {
            let cube = cube_with_moves(moves);
            assert_eq!(set.estimate(&cube), MisplacedEdges.estimate(&cube));
        }
    }

    #[test]
    fn largest_lookup_wins() {
        let mut set = PatternSet::default();
        set.insert(flat_table(PatternKind::EdgesA, 3));
        set.insert(flat_table(PatternKind::EdgesB, 5));

        assert_eq!(set.loaded().count(), 2);
        assert!(set.get(PatternKind::Corners).is_none());
        assert_eq!(set.estimate(&cube_with_moves("R U F")), 5);
    }

    #[test]
    fn zero_lookups_fall_back_to_misplaced_edges() {
        let mut set = PatternSet::default();
        set.insert(flat_table(PatternKind::EdgesA, 0));

        assert_eq!(set.estimate(&CubeState::solved()), 0);
        assert_eq!(set.estimate(&cube_with_moves("U R")), 2);
    }

    #[test]
    fn insert_files_table_under_its_kind() {
        let mut set = PatternSet::default();
        set.insert(flat_table(PatternKind::EdgesA, 6));

        assert_eq!(set.get(PatternKind::EdgesA).unwrap().kind(), PatternKind::EdgesA);
        assert!(set.get(PatternKind::EdgesB).is_none());
        assert!(!set.is_empty());
    }

    #[test]
    fn insert_replaces_table_of_same_kind() {
        let mut set = PatternSet::default();
        set.insert(flat_table(PatternKind::EdgesB, 1));
        set.insert(flat_table(PatternKind::EdgesB, 4));

        assert_eq!(set.loaded().count(), 1);
        assert_eq!(set.get(PatternKind::EdgesB).unwrap().max_distance(), 4);
    }

    #[test]
    fn load_dir_skips_missing_tables() {
        let dir = std::env::temp_dir().join(format!("pdbcube-load-dir-{}", std::process::id()));
        io::save(
            &flat_table(PatternKind::EdgesB, 2),
            &dir.join(PatternKind::EdgesB.file_name()),
        )
        .unwrap();

        let set = PatternSet::load_dir(&dir);
        assert!(set.get(PatternKind::Corners).is_none());
        assert!(set.get(PatternKind::EdgesA).is_none());
        assert_eq!(set.get(PatternKind::EdgesB).unwrap().max_distance(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    #[ignore = "builds every table; run with --release -- --ignored"]
    fn built_tables_are_admissible() {
        let mut set = PatternSet::default();
        for kind in enum_iterator::all::<PatternKind>() {
            set.insert(crate::pattern::build(kind).unwrap());
        }
        for (cube, &distance) in KNOWN_DISTANCES.iter() {
            assert!(set.estimate(cube) <= distance, "{:?}", cube);
        }
    }
}
