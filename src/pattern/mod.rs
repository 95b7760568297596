//! Pattern databases: dense distance tables over part of the cube.

use crate::prelude::*;

use std::path::PathBuf;
use thiserror::Error;

mod build;
pub mod io;

pub use build::*;

/// Entry value for an index the breadth-first search has not reached.
pub const UNVISITED: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum PatternKind {
    Corners,
    EdgesA,
    EdgesB,
}

impl PatternKind {
    pub fn size(self) -> usize {
        match self {
            PatternKind::Corners => CORNER_STATES,
            PatternKind::EdgesA | PatternKind::EdgesB => EDGE_SUBSET_STATES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Corners => "corners",
            PatternKind::EdgesA => "edges_a",
            PatternKind::EdgesB => "edges_b",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.bin", self.name())
    }

    pub fn subset(self) -> Option<EdgeSubset> {
        match self {
            PatternKind::Corners => None,
            PatternKind::EdgesA => Some(EdgeSubset::A),
            PatternKind::EdgesB => Some(EdgeSubset::B),
        }
    }

    pub fn index(self, cube: &CubeState) -> usize {
        match self.subset() {
            None => corner_index(cube),
            Some(subset) => edge_subset_index(cube, &subset),
        }
    }
}

impl core::str::FromStr for PatternKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<PatternKind, PatternError> {
        enum_iterator::all::<PatternKind>()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PatternError::UnknownKind(s.to_string()))
    }
}

impl core::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("unknown pattern database {0:?}, expected corners, edges_a or edges_b")]
    UnknownKind(String),
    #[error("{kind} table has {actual} bytes, expected {expected}")]
    WrongSize {
        kind: PatternKind,
        expected: usize,
        actual: usize,
    },
    #[error("{name} table has {unreached} unreached entries")]
    Incomplete { name: String, unreached: usize },
    #[error("{name} coordinate decodes index {index} to a state with index {reencoded}")]
    Inconsistent {
        name: String,
        index: usize,
        reencoded: usize,
    },
    #[error("{name} coordinate produced index {index} outside its {count} entries")]
    IndexOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },
    #[error("{name} successor of index {index} breaks the orientation invariant")]
    InvariantViolated { name: String, index: usize },
    #[error("{name} search did not finish below distance {max}", max = UNVISITED)]
    TooDeep { name: String },
    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A finished distance table. Every entry is a reachable distance, and the
/// table length always matches its kind's encoder.
#[derive(Clone, PartialEq, Eq)]
pub struct PatternDatabase {
    kind: PatternKind,
    table: Box<[u8]>,
}

impl PatternDatabase {
    pub fn from_bytes(kind: PatternKind, bytes: Vec<u8>) -> Result<Self, PatternError> {
        if bytes.len() != kind.size() {
            return Err(PatternError::WrongSize {
                kind,
                expected: kind.size(),
                actual: bytes.len(),
            });
        }

        let unreached = bytes.iter().filter(|&&d| d == UNVISITED).count();
        if unreached > 0 {
            return Err(PatternError::Incomplete {
                name: kind.name().to_string(),
                unreached,
            });
        }

        Ok(PatternDatabase {
            kind,
            table: bytes.into_boxed_slice(),
        })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.table
    }

    pub fn max_distance(&self) -> u8 {
        self.table.iter().copied().max().unwrap_or_default()
    }

    /// Lower bound on the moves needed to solve `cube`.
    ///
    /// Panics if the encoder produces an index past the end of the table,
    /// which means the encoder and the stored table disagree.
    pub fn lookup(&self, cube: &CubeState) -> u8 {
        let index = self.kind.index(cube);
        match self.table.get(index) {
            Some(&distance) => distance,
            None => panic!(
                "{}: index {} outside table of {} entries for cube\n{:?}",
                self.kind,
                index,
                self.table.len(),
                cube
            ),
        }
    }
}

impl core::fmt::Debug for PatternDatabase {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("PatternDatabase")
            .field("kind", &self.kind)
            .field("len", &self.table.len())
            .finish()
    }
}
