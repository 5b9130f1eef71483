//! Raw candidate digits per variable

use crate::config::DomainRule;
use crate::puzzle::Puzzle;

/// Hands out each variable's candidate digits before cross-variable pruning
#[derive(Debug, Clone)]
pub struct DomainProvider {
    leading: [char; 3],
    /// Sum's leading letter and its only possible value under `CarryAware`
    carry_letter: Option<(char, CarryDigit)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarryDigit {
    /// Sum is exactly one letter longer than the longer addend
    One,
    /// Sum is two or more letters longer; its leading digit would have to be 0
    Impossible,
}

impl DomainProvider {
    pub fn new(puzzle: &Puzzle, rule: DomainRule) -> Self {
        let carry_letter = match rule {
            DomainRule::General => None,
            DomainRule::CarryAware => {
                let extra = puzzle.sum().len().saturating_sub(puzzle.longest_addend());
                let letter = puzzle.sum().leading_letter();
                match extra {
                    0 => None,
                    1 => Some((letter, CarryDigit::One)),
                    _ => Some((letter, CarryDigit::Impossible)),
                }
            }
        };

        Self {
            leading: puzzle.leading_letters(),
            carry_letter,
        }
    }

    /// Candidate digits for `var` in ascending order
    pub fn domain(&self, var: char) -> Vec<u8> {
        if let Some((letter, carry)) = self.carry_letter {
            if letter == var {
                return match carry {
                    CarryDigit::One => vec![1],
                    CarryDigit::Impossible => Vec::new(),
                };
            }
        }

        let lowest = if self.leading.contains(&var) { 1 } else { 0 };
        (lowest..=9).collect()
    }
}
