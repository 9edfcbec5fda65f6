//! Solver library for the Hexagon-1 twisty puzzle.
//!
//! The puzzle state is two 108-bit packed rows, so turns, slices and solve
//! checks are all constant-time bit operations. On top of that sits a
//! depth-bounded brute-force search that fans out over rayon workers and
//! stops at the first solution, plus a formatter that tidies the recorded
//! move history for printing.

pub mod config;
pub mod format;
pub mod goal;
pub mod moves;
pub mod predicates;
pub mod puzzle;
pub mod slot;
pub mod solver;

// Re-export main types
pub use config::{Config, ConfigError, GoalConfig};
pub use goal::{Goal, PatternError};
pub use moves::{parse_sequence, wrap_negative, wrap_positive, Move, MoveList, ParseMoveError};
pub use puzzle::{turn_row, Puzzle, PuzzleError};
pub use slot::Row;
pub use solver::{find_solution, SearchResult, Solution, SolverConfig, SolverError};
