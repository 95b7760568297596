mod heuristic;
pub use heuristic::*;

mod ida;
pub use ida::*;
