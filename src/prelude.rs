pub use crate::cube::*;
pub use crate::pattern::{PatternDatabase, PatternError, PatternKind};
pub use crate::r#move::*;
pub use crate::solver::*;

#[cfg(test)]
pub use crate::test::*;

pub use std::time::Duration;
