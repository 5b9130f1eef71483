//! The `addend + addend = sum` puzzle

use super::Word;
use crate::csp::{InputError, Unsolvable, VariableSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most distinct letters a puzzle can have: one per digit
pub const MAX_LETTERS: usize = 10;

/// A cryptarithm `addend1 + addend2 = sum`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Puzzle {
    addend1: Word,
    addend2: Word,
    sum: Word,
}

impl Puzzle {
    /// Validate the three words and build a puzzle
    pub fn new(addend1: &str, addend2: &str, sum: &str) -> Result<Self, InputError> {
        Ok(Self {
            addend1: Word::new(addend1, "first addend")?,
            addend2: Word::new(addend2, "second addend")?,
            sum: Word::new(sum, "sum")?,
        })
    }

    pub fn addend1(&self) -> &Word {
        &self.addend1
    }

    pub fn addend2(&self) -> &Word {
        &self.addend2
    }

    pub fn sum(&self) -> &Word {
        &self.sum
    }

    pub fn words(&self) -> [&Word; 3] {
        [&self.addend1, &self.addend2, &self.sum]
    }

    /// Leading letter of each word, in word order
    pub fn leading_letters(&self) -> [char; 3] {
        self.words().map(Word::leading_letter)
    }

    pub fn is_leading_letter(&self, letter: char) -> bool {
        self.leading_letters().contains(&letter)
    }

    /// Length of the longer addend
    pub fn longest_addend(&self) -> usize {
        self.addend1.len().max(self.addend2.len())
    }

    /// Shape checks that rule out a solution before any search.
    ///
    /// Returns the puzzle's variables when the shape is feasible.
    pub fn check_structure(&self) -> Result<VariableSet, Unsolvable> {
        if self.sum.len() < self.longest_addend() {
            return Err(Unsolvable::LengthInfeasibility {
                sum: self.sum.len(),
                longest_addend: self.longest_addend(),
            });
        }

        let variables = VariableSet::from_puzzle(self);
        if variables.len() > MAX_LETTERS {
            return Err(Unsolvable::StructuralInfeasibility {
                letters: variables.len(),
            });
        }

        Ok(variables)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.addend1, self.addend2, self.sum)
    }
}

/// Parses the one-line form `SEND + MORE = MONEY`
impl FromStr for Puzzle {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InputError::MalformedEquation { text: s.to_string() };

        let (lhs, sum) = s.split_once('=').ok_or_else(malformed)?;
        let (addend1, addend2) = lhs.split_once('+').ok_or_else(malformed)?;
        if sum.contains('=') || addend2.contains('+') {
            return Err(malformed());
        }

        Puzzle::new(addend1.trim(), addend2.trim(), sum.trim())
    }
}
