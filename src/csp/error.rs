//! Typed outcomes of a solve that did not produce a solution

use thiserror::Error;

/// Why a word was rejected before any search took place
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{role} word is empty")]
    EmptyWord { role: &'static str },

    #[error("{role} word `{word}` contains '{ch}' at position {position}; only uppercase A-Z is allowed")]
    InvalidCharacter {
        role: &'static str,
        word: String,
        ch: char,
        position: usize,
    },

    #[error("`{text}` is not of the form WORD + WORD = WORD")]
    MalformedEquation { text: String },
}

/// Every way `solve` can end without a solution.
///
/// `SearchExhausted` is an ordinary answer ("this puzzle has no solution"),
/// the other variants mean the search was never started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unsolvable {
    #[error("puzzle uses {letters} distinct letters but only 10 digits exist")]
    StructuralInfeasibility { letters: usize },

    #[error("sum has {sum} letters but an addend has {longest_addend}; the sum can never be shorter")]
    LengthInfeasibility { sum: usize, longest_addend: usize },

    #[error("no assignment of digits satisfies the puzzle")]
    SearchExhausted,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

impl Unsolvable {
    /// True when the search ran to completion and found nothing
    pub fn is_search_exhausted(&self) -> bool {
        matches!(self, Unsolvable::SearchExhausted)
    }

    /// True when the puzzle shape alone rules out a solution
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Unsolvable::StructuralInfeasibility { .. } | Unsolvable::LengthInfeasibility { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Unsolvable::SearchExhausted.is_search_exhausted());
        assert!(!Unsolvable::SearchExhausted.is_structural());
        assert!(Unsolvable::StructuralInfeasibility { letters: 11 }.is_structural());
        assert!(Unsolvable::LengthInfeasibility { sum: 2, longest_addend: 3 }.is_structural());

        let input: Unsolvable = InputError::EmptyWord { role: "sum" }.into();
        assert!(!input.is_structural());
        assert!(!input.is_search_exhausted());
    }

    #[test]
    fn test_messages() {
        let err = Unsolvable::StructuralInfeasibility { letters: 11 };
        assert!(err.to_string().contains("11 distinct letters"));

        let err = Unsolvable::from(InputError::InvalidCharacter {
            role: "first addend",
            word: "SE1D".to_string(),
            ch: '1',
            position: 2,
        });
        assert!(err.to_string().contains("'1' at position 2"));
    }
}
