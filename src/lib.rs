pub mod cube;
pub mod r#move;
pub mod pattern;
pub mod prelude;
pub mod scramble;
pub mod solver;


#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;
