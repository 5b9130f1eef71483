//! The single gate deciding whether a digit may be placed on a letter

use super::Assignment;
use crate::puzzle::Puzzle;
use std::cell::Cell;

/// Checks uniqueness, no-leading-zero and, on complete assignments, the sum.
///
/// Every call is counted so callers can see how much work the search did.
#[derive(Debug)]
pub struct ConsistencyChecker<'p> {
    puzzle: &'p Puzzle,
    variable_count: usize,
    checks: Cell<u64>,
}

impl<'p> ConsistencyChecker<'p> {
    pub fn new(puzzle: &'p Puzzle, variable_count: usize) -> Self {
        Self {
            puzzle,
            variable_count,
            checks: Cell::new(0),
        }
    }

    /// Would `var = digit` be a legal next step from `assignment`?
    ///
    /// `assignment` is returned exactly as it was found.
    pub fn is_consistent(&self, var: char, digit: u8, assignment: &mut Assignment) -> bool {
        self.checks.set(self.checks.get() + 1);

        if assignment.uses_digit(digit) {
            return false;
        }

        if digit == 0 && self.puzzle.is_leading_letter(var) {
            return false;
        }

        assignment.with_trial(var, digit, |trial| {
            trial.len() < self.variable_count || sum_holds(self.puzzle, trial)
        })
    }

    /// Number of `is_consistent` calls so far
    pub fn checks(&self) -> u64 {
        self.checks.get()
    }
}

/// `addend1 + addend2 == sum` under `assignment`, evaluated column by column.
///
/// Unassigned letters make the equation false.
pub fn sum_holds(puzzle: &Puzzle, assignment: &Assignment) -> bool {
    let sum = puzzle.sum();
    if sum.len() < puzzle.longest_addend() {
        return false;
    }

    let digit_at = |letter: Option<char>| -> Option<u32> {
        match letter {
            Some(letter) => assignment.get(letter).map(u32::from),
            None => Some(0),
        }
    };

    let mut carry = 0;
    for column in 0..sum.len() {
        let (Some(a), Some(b), Some(s)) = (
            digit_at(puzzle.addend1().letter_from_right(column)),
            digit_at(puzzle.addend2().letter_from_right(column)),
            digit_at(sum.letter_from_right(column)),
        ) else {
            return false;
        };

        let total = a + b + carry;
        if total % 10 != s {
            return false;
        }
        carry = total / 10;
    }

    carry == 0
}
