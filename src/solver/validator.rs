//! Independent checking of cryptarithm solutions

use super::PuzzleOutcome;
use crate::puzzle::{Puzzle, Word};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Marker written in place of digits when the search found no solution
pub const NO_SOLUTION_MARKER: &str = "No solution";

/// Leading token of the output line for a puzzle rejected before search
pub const INVALID_PUZZLE_MARKER: &str = "Invalid puzzle";

/// Leading token of the output line for a search that ran out of time
pub const TIMED_OUT_MARKER: &str = "Timed out";

/// Checks assignments against a puzzle without going through the search code
pub struct SolutionValidator;

/// Result of solution validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Unassigned { letter: char },
    DigitOutOfRange { letter: char, digit: u8 },
    SharedDigit { digit: u8, letters: (char, char) },
    LeadingZero { letter: char },
    SumMismatch { addend1: String, addend2: String, sum: String, actual: String },
    /// Rendered word does not line up with the puzzle word
    ShapeMismatch { word: String, rendered: String },
    /// Same letter rendered as two different digits
    InconsistentLetter { letter: char, digits: (u8, u8) },
    /// Output claims no solution but one exists
    MissedSolution { example: String },
    /// Output claims the puzzle was rejected but its shape is feasible
    FeasibleRejected,
    /// JSON output belongs to another puzzle
    PuzzleMismatch { expected: String, found: String },
}

impl SolutionValidator {
    /// Validate a letter-to-digit mapping against `puzzle`
    pub fn validate(puzzle: &Puzzle, assignment: &BTreeMap<char, u8>) -> ValidationResult {
        let mut violations = Vec::new();

        let letters: Vec<char> = puzzle
            .words()
            .into_iter()
            .flat_map(|word| word.letters())
            .sorted_unstable()
            .dedup()
            .collect();

        for &letter in &letters {
            match assignment.get(&letter) {
                None => violations.push(Violation::Unassigned { letter }),
                Some(&digit) if digit > 9 => violations.push(Violation::DigitOutOfRange { letter, digit }),
                Some(_) => {}
            }
        }

        let mut owner: BTreeMap<u8, char> = BTreeMap::new();
        for (&letter, &digit) in assignment {
            if let Some(&first) = owner.get(&digit) {
                violations.push(Violation::SharedDigit { digit, letters: (first, letter) });
            } else {
                owner.insert(digit, letter);
            }
        }

        for letter in puzzle.leading_letters().into_iter().unique() {
            if assignment.get(&letter) == Some(&0) {
                violations.push(Violation::LeadingZero { letter });
            }
        }

        if violations.is_empty() {
            let [addend1, addend2, sum] = puzzle.words().map(|word| render_word(word, assignment));
            let actual = add_decimal(&addend1, &addend2);
            if strip_zeros(&actual) != strip_zeros(&sum) {
                violations.push(Violation::SumMismatch { addend1, addend2, sum, actual });
            }
        }

        ValidationResult::from_violations(violations)
    }

    /// Validate the digit strings of a written solution against `puzzle`
    pub fn validate_rendered(puzzle: &Puzzle, rendered: [&str; 3]) -> ValidationResult {
        let mut violations = Vec::new();
        let mut assignment: BTreeMap<char, u8> = BTreeMap::new();

        for (word, digits) in puzzle.words().into_iter().zip(rendered) {
            if digits.len() != word.len() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                violations.push(Violation::ShapeMismatch {
                    word: word.to_string(),
                    rendered: digits.to_string(),
                });
                continue;
            }

            for (letter, byte) in word.letters().zip(digits.bytes()) {
                let digit = byte - b'0';
                match assignment.get(&letter) {
                    Some(&known) if known != digit => {
                        let violation = Violation::InconsistentLetter { letter, digits: (known, digit) };
                        if !violations.contains(&violation) {
                            violations.push(violation);
                        }
                    }
                    Some(_) => {}
                    None => {
                        assignment.insert(letter, digit);
                    }
                }
            }
        }

        if !violations.is_empty() {
            return ValidationResult::from_violations(violations);
        }

        Self::validate(puzzle, &assignment)
    }

    /// Check an output file written by `solve`. Files ending in `.json` are
    /// read as a serialized outcome, anything else as the text format.
    pub fn validate_output_file<P: AsRef<Path>>(puzzle: &Puzzle, path: P) -> Result<ValidationResult> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read solution file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            let outcome = PuzzleOutcome::from_json(&content)
                .with_context(|| format!("Failed to parse solution file: {}", path.display()))?;
            return Self::validate_outcome(puzzle, &outcome);
        }

        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        match lines.as_slice() {
            [line] if *line == NO_SOLUTION_MARKER => Ok(Self::validate_unsolvable(puzzle)),
            [line] if line.starts_with(INVALID_PUZZLE_MARKER) => Ok(Self::validate_rejection(puzzle)),
            [line] if line.starts_with(TIMED_OUT_MARKER) => {
                anyhow::bail!("Solution file {} records a timeout; there is no answer to check", path.display())
            }
            [addend1, addend2, sum] => Ok(Self::validate_rendered(puzzle, [*addend1, *addend2, *sum])),
            _ => anyhow::bail!(
                "Solution file {} must hold three digit lines, '{}', '{}: ...' or '{} ...'",
                path.display(),
                NO_SOLUTION_MARKER,
                INVALID_PUZZLE_MARKER,
                TIMED_OUT_MARKER
            ),
        }
    }

    /// Check an outcome read back from JSON output
    pub fn validate_outcome(puzzle: &Puzzle, outcome: &PuzzleOutcome) -> Result<ValidationResult> {
        if outcome.puzzle() != puzzle {
            return Ok(ValidationResult::from_violations(vec![Violation::PuzzleMismatch {
                expected: puzzle.to_string(),
                found: outcome.puzzle().to_string(),
            }]));
        }

        match outcome {
            PuzzleOutcome::Solved { solution } => {
                let result = Self::validate(puzzle, &solution.assignment);
                if !result.is_valid {
                    return Ok(result);
                }

                // The written digit strings must agree with the mapping
                let violations = puzzle
                    .words()
                    .into_iter()
                    .zip(solution.rendered())
                    .filter(|(word, digits)| render_word(word, &solution.assignment) != *digits)
                    .map(|(word, digits)| Violation::ShapeMismatch {
                        word: word.to_string(),
                        rendered: digits.to_string(),
                    })
                    .collect();
                Ok(ValidationResult::from_violations(violations))
            }
            PuzzleOutcome::NoSolution { .. } => Ok(Self::validate_unsolvable(puzzle)),
            PuzzleOutcome::Rejected { .. } => Ok(Self::validate_rejection(puzzle)),
            PuzzleOutcome::TimedOut { seconds, .. } => {
                anyhow::bail!("Outcome records a timeout after {}s; there is no answer to check", seconds)
            }
        }
    }

    /// A "no solution" claim holds when brute force finds nothing either
    fn validate_unsolvable(puzzle: &Puzzle) -> ValidationResult {
        let violations = match Self::brute_force(puzzle) {
            Some(found) => vec![Violation::MissedSolution {
                example: format_mapping(&found),
            }],
            None => Vec::new(),
        };
        ValidationResult::from_violations(violations)
    }

    fn validate_rejection(puzzle: &Puzzle) -> ValidationResult {
        match puzzle.check_structure() {
            Err(reason) if reason.is_structural() => ValidationResult::from_violations(Vec::new()),
            _ => ValidationResult::from_violations(vec![Violation::FeasibleRejected]),
        }
    }

    /// Exhaustive reference solver: tries every injective mapping in order.
    ///
    /// Only practical for small puzzles; returns `None` for puzzles with more
    /// than 10 letters or a sum shorter than an addend.
    pub fn brute_force(puzzle: &Puzzle) -> Option<BTreeMap<char, u8>> {
        let variables = puzzle.check_structure().ok()?;
        let letters = variables.as_slice();

        (0..=9u8).permutations(letters.len()).find_map(|digits| {
            let assignment: BTreeMap<char, u8> = letters.iter().copied().zip(digits).collect();
            Self::validate(puzzle, &assignment).is_valid.then_some(assignment)
        })
    }
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

/// Schoolbook addition of two non-negative decimal strings
pub fn add_decimal(a: &str, b: &str) -> String {
    let mut a_digits = a.bytes().rev().map(|b| b - b'0');
    let mut b_digits = b.bytes().rev().map(|b| b - b'0');
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;

    loop {
        let (x, y) = (a_digits.next(), b_digits.next());
        if x.is_none() && y.is_none() {
            break;
        }
        let total = x.unwrap_or(0) + y.unwrap_or(0) + carry;
        out.push(b'0' + total % 10);
        carry = total / 10;
    }
    if carry > 0 {
        out.push(b'0' + carry);
    }

    out.iter().rev().map(|&d| d as char).collect()
}

/// `word` with every letter replaced by its digit; all letters must be mapped
fn render_word(word: &Word, assignment: &BTreeMap<char, u8>) -> String {
    word.letters()
        .map(|letter| char::from(b'0' + assignment[&letter]))
        .collect()
}

fn strip_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

fn format_mapping(assignment: &BTreeMap<char, u8>) -> String {
    assignment
        .iter()
        .map(|(letter, digit)| format!("{}={}", letter, digit))
        .join(" ")
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unassigned { letter } => write!(f, "{} has no digit", letter),
            Violation::DigitOutOfRange { letter, digit } => {
                write!(f, "{} is mapped to {}, which is not a digit", letter, digit)
            }
            Violation::SharedDigit { digit, letters } => {
                write!(f, "{} and {} share the digit {}", letters.0, letters.1, digit)
            }
            Violation::LeadingZero { letter } => write!(f, "leading letter {} is 0", letter),
            Violation::SumMismatch { addend1, addend2, sum, actual } => {
                write!(f, "{} + {} = {}, not {}", addend1, addend2, actual, sum)
            }
            Violation::ShapeMismatch { word, rendered } => {
                write!(f, "`{}` is not a digit rendering of {}", rendered, word)
            }
            Violation::InconsistentLetter { letter, digits } => {
                write!(f, "{} appears as both {} and {}", letter, digits.0, digits.1)
            }
            Violation::MissedSolution { example } => {
                write!(f, "marked unsolvable, but {} solves it", example)
            }
            Violation::FeasibleRejected => write!(f, "marked invalid, but the puzzle shape is feasible"),
            Violation::PuzzleMismatch { expected, found } => {
                write!(f, "output is for {}, not {}", found, expected)
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mapping(pairs: &[(char, u8)]) -> BTreeMap<char, u8> {
        pairs.iter().copied().collect()
    }

    fn send_more_money() -> Puzzle {
        Puzzle::new("SEND", "MORE", "MONEY").unwrap()
    }

    const SEND_SOLUTION: [(char, u8); 8] = [
        ('D', 7), ('E', 5), ('M', 1), ('N', 6), ('O', 0), ('R', 8), ('S', 9), ('Y', 2),
    ];

    #[test]
    fn test_add_decimal() {
        assert_eq!(add_decimal("9567", "1085"), "10652");
        assert_eq!(add_decimal("0", "0"), "0");
        assert_eq!(add_decimal("5", "5"), "10");
        assert_eq!(add_decimal("999999999999999999999", "1"), "1000000000000000000000");
    }

    #[test]
    fn test_valid_solution() {
        let result = SolutionValidator::validate(&send_more_money(), &mapping(&SEND_SOLUTION));
        assert!(result.is_valid);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_sum_mismatch() {
        let mut pairs = SEND_SOLUTION;
        pairs[7] = ('Y', 3);
        let result = SolutionValidator::validate(&send_more_money(), &mapping(&pairs));

        assert!(!result.is_valid);
        assert!(matches!(result.violations[0], Violation::SumMismatch { .. }));
    }

    #[test]
    fn test_rule_violations() {
        let puzzle = Puzzle::new("A", "A", "B").unwrap();

        let result = SolutionValidator::validate(&puzzle, &mapping(&[('A', 0), ('B', 0)]));
        assert!(result.violations.contains(&Violation::SharedDigit { digit: 0, letters: ('A', 'B') }));
        assert!(result.violations.contains(&Violation::LeadingZero { letter: 'A' }));
        assert!(result.violations.contains(&Violation::LeadingZero { letter: 'B' }));

        let result = SolutionValidator::validate(&puzzle, &mapping(&[('A', 1)]));
        assert_eq!(result.violations, vec![Violation::Unassigned { letter: 'B' }]);

        let result = SolutionValidator::validate(&puzzle, &mapping(&[('A', 1), ('B', 12)]));
        assert_eq!(result.violations, vec![Violation::DigitOutOfRange { letter: 'B', digit: 12 }]);
    }

    #[test]
    fn test_validate_rendered() {
        let puzzle = send_more_money();
        assert!(SolutionValidator::validate_rendered(&puzzle, ["9567", "1085", "10652"]).is_valid);

        // M rendered as 1 and 2
        let result = SolutionValidator::validate_rendered(&puzzle, ["9567", "1085", "20652"]);
        assert!(result
            .violations
            .contains(&Violation::InconsistentLetter { letter: 'M', digits: (1, 2) }));

        let result = SolutionValidator::validate_rendered(&puzzle, ["956", "1085", "10652"]);
        assert!(matches!(result.violations[0], Violation::ShapeMismatch { .. }));
    }

    #[test]
    fn test_brute_force() {
        let found = SolutionValidator::brute_force(&Puzzle::new("A", "A", "B").unwrap()).unwrap();
        assert_eq!(found, mapping(&[('A', 1), ('B', 2)]));

        assert!(SolutionValidator::brute_force(&Puzzle::new("ABCD", "ABCD", "ABCDE").unwrap()).is_none());
        assert!(SolutionValidator::brute_force(&Puzzle::new("AB", "C", "D").unwrap()).is_none());
    }

    #[test]
    fn test_validate_output_file() {
        let temp_dir = tempdir().unwrap();
        let solved = temp_dir.path().join("output_input1.txt");
        std::fs::write(&solved, "9567\n1085\n10652\n").unwrap();
        let result = SolutionValidator::validate_output_file(&send_more_money(), &solved).unwrap();
        assert!(result.is_valid);

        let unsolvable = temp_dir.path().join("output_input5.txt");
        std::fs::write(&unsolvable, "No solution\n").unwrap();
        let puzzle = Puzzle::new("ABCD", "ABCD", "ABCDE").unwrap();
        assert!(SolutionValidator::validate_output_file(&puzzle, &unsolvable).unwrap().is_valid);

        // A + A = B does have a solution
        let puzzle = Puzzle::new("A", "A", "B").unwrap();
        let result = SolutionValidator::validate_output_file(&puzzle, &unsolvable).unwrap();
        assert!(matches!(result.violations[0], Violation::MissedSolution { .. }));

        let garbage = temp_dir.path().join("garbage.txt");
        std::fs::write(&garbage, "1\n2\n").unwrap();
        assert!(SolutionValidator::validate_output_file(&puzzle, &garbage).is_err());
    }

    #[test]
    fn test_rejected_and_timed_out_lines() {
        let temp_dir = tempdir().unwrap();
        let rejected = temp_dir.path().join("output_rejected.txt");
        std::fs::write(&rejected, "Invalid puzzle: sum has 2 letters but an addend has 3\n").unwrap();

        let short_sum = Puzzle::new("ABC", "D", "EF").unwrap();
        assert!(SolutionValidator::validate_output_file(&short_sum, &rejected).unwrap().is_valid);

        // Rejecting a well-shaped puzzle is wrong, and is not a "no solution" claim
        let result = SolutionValidator::validate_output_file(&send_more_money(), &rejected).unwrap();
        assert_eq!(result.violations, vec![Violation::FeasibleRejected]);

        let timed_out = temp_dir.path().join("output_slow.txt");
        std::fs::write(&timed_out, "Timed out after 5s\n").unwrap();
        assert!(SolutionValidator::validate_output_file(&send_more_money(), &timed_out).is_err());

        // The no-solution marker must stand alone
        let annotated = temp_dir.path().join("output_annotated.txt");
        std::fs::write(&annotated, "No solution (gave up)\n").unwrap();
        assert!(SolutionValidator::validate_output_file(&send_more_money(), &annotated).is_err());
    }

    #[test]
    fn test_validate_json_outcomes() {
        use crate::csp::SearchOptions;
        use crate::solver::CryptarithmProblem;

        let temp_dir = tempdir().unwrap();
        let puzzle = Puzzle::new("TWO", "TWO", "FOUR").unwrap();
        let outcome = CryptarithmProblem::new(puzzle.clone(), SearchOptions::default()).run(None);

        let path = temp_dir.path().join("output_input2.json");
        std::fs::write(&path, outcome.to_json().unwrap()).unwrap();
        assert!(SolutionValidator::validate_output_file(&puzzle, &path).unwrap().is_valid);

        // Digit strings that disagree with the mapping
        let mut tampered = outcome.clone();
        if let PuzzleOutcome::Solved { solution } = &mut tampered {
            solution.sum = "0000".to_string();
        }
        let result = SolutionValidator::validate_outcome(&puzzle, &tampered).unwrap();
        assert!(matches!(result.violations[0], Violation::ShapeMismatch { .. }));

        let result = SolutionValidator::validate_outcome(&send_more_money(), &outcome).unwrap();
        assert!(matches!(result.violations[0], Violation::PuzzleMismatch { .. }));

        let exhausted = Puzzle::new("ABCD", "ABCD", "ABCDE").unwrap();
        let outcome = CryptarithmProblem::new(exhausted.clone(), SearchOptions::default()).run(None);
        let path = temp_dir.path().join("output_input5.json");
        std::fs::write(&path, outcome.to_json().unwrap()).unwrap();
        assert!(SolutionValidator::validate_output_file(&exhausted, &path).unwrap().is_valid);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(SolutionValidator::validate_output_file(&exhausted, &path).is_err());
    }
}
