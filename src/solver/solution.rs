//! Solution representation for cryptarithm puzzles

use crate::csp::{Assignment, SearchStatistics};
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A complete digit assignment satisfying a puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The puzzle this solves
    pub puzzle: Puzzle,
    /// Digit of every letter
    pub assignment: BTreeMap<char, u8>,
    /// First addend with letters replaced by digits
    pub addend1: String,
    /// Second addend with letters replaced by digits
    pub addend2: String,
    /// Sum with letters replaced by digits
    pub sum: String,
    /// Work the search did to find this solution
    pub statistics: SearchStatistics,
    /// Time taken to find this solution
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    /// Build a solution from a finished search. `None` if a letter is unassigned.
    pub fn from_assignment(
        puzzle: &Puzzle,
        assignment: &Assignment,
        statistics: SearchStatistics,
        solve_time: Duration,
    ) -> Option<Self> {
        let [addend1, addend2, sum] = puzzle.words().map(|word| word.render(assignment));

        Some(Self {
            puzzle: puzzle.clone(),
            assignment: assignment.to_map(),
            addend1: addend1?,
            addend2: addend2?,
            sum: sum?,
            statistics,
            solve_time,
        })
    }

    /// Digit assigned to `letter`
    pub fn digit(&self, letter: char) -> Option<u8> {
        self.assignment.get(&letter).copied()
    }

    /// The three rendered words, in puzzle order
    pub fn rendered(&self) -> [&str; 3] {
        [&self.addend1, &self.addend2, &self.sum]
    }

    /// `9567 + 1085 = 10652`
    pub fn equation(&self) -> String {
        format!("{} + {} = {}", self.addend1, self.addend2, self.sum)
    }

    /// `D=7 E=5 M=1 ...`
    pub fn mapping(&self) -> String {
        self.assignment
            .iter()
            .map(|(letter, digit)| format!("{}={}", letter, digit))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
