//! Puzzle letters as search variables

use crate::puzzle::Puzzle;
use itertools::Itertools;

/// Sorted, distinct alphabetic characters of `text`. Anything else is skipped.
pub fn extract_letters(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .sorted_unstable()
        .dedup()
        .collect()
}

/// The letters of one puzzle, in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    letters: Vec<char>,
}

impl VariableSet {
    /// Build the variable set from the three words of a puzzle
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        let text = format!("{}{}{}", puzzle.addend1(), puzzle.addend2(), puzzle.sum());
        Self {
            letters: extract_letters(&text),
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.binary_search(&letter).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.letters
    }
}
