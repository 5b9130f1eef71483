//! Cryptarithm Solver
//!
//! Solves puzzles of the form `WORD + WORD = WORD`, where every letter stands
//! for a distinct digit and no word starts with 0, using backtracking search
//! with minimum-remaining-values and least-constraining-value ordering.

pub mod config;
pub mod csp;
pub mod puzzle;
pub mod solver;
pub mod utils;

pub use config::Settings;
pub use csp::{InputError, SearchOptions, SearchStatistics, Unsolvable};
pub use puzzle::Puzzle;
pub use solver::{CryptarithmProblem, Solution};

/// Main entry point: solve `addend1 + addend2 = sum` with the default options
pub fn solve(addend1: &str, addend2: &str, sum: &str) -> Result<Solution, Unsolvable> {
    let puzzle = Puzzle::new(addend1, addend2, sum)?;
    CryptarithmProblem::new(puzzle, SearchOptions::default()).solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_entry_point() {
        let solution = solve("SEND", "MORE", "MONEY").unwrap();
        assert_eq!(solution.rendered(), ["9567", "1085", "10652"]);
    }

    #[test]
    fn test_solve_distinguishes_failures() {
        assert!(matches!(solve("SEND", "", "MONEY"), Err(Unsolvable::InvalidInput(_))));
        assert!(matches!(
            solve("ABCDEF", "GHIJK", "ABCDEFK"),
            Err(Unsolvable::StructuralInfeasibility { letters: 11 })
        ));
        assert!(matches!(solve("ABC", "D", "EF"), Err(Unsolvable::LengthInfeasibility { .. })));
        assert_eq!(solve("ABCD", "ABCD", "ABCDE").unwrap_err(), Unsolvable::SearchExhausted);
    }
}
