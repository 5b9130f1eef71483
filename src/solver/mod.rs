//! Cryptarithm problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{CryptarithmProblem, HeuristicRun, PuzzleOutcome, SearchSpaceEstimate};
pub use solution::Solution;
pub use validator::{
    SolutionValidator, ValidationResult, Violation, INVALID_PUZZLE_MARKER, NO_SOLUTION_MARKER,
    TIMED_OUT_MARKER,
};
