//! Depth-first backtracking over letter assignments

use super::heuristics::{order_values, select_variable};
use super::{consistency::sum_holds, Assignment, ConsistencyChecker, DomainProvider, VariableSet};
use crate::config::{DomainRule, ValueOrdering, VariableOrdering};
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};

/// Knobs for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub domain_rule: DomainRule,
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Calls into the recursive step
    pub nodes: u64,
    /// Digits committed to the assignment
    pub assignments: u64,
    /// Commits undone after their subtree failed
    pub backtracks: u64,
    /// Consistency checks, including those made by the heuristics
    pub consistency_checks: u64,
    /// Deepest level reached (number of assigned letters)
    pub max_depth: usize,
}

/// Backtracking search for the first complete consistent assignment
pub struct BacktrackingSearch<'p> {
    puzzle: &'p Puzzle,
    variables: &'p VariableSet,
    options: SearchOptions,
    domains: DomainProvider,
    checker: ConsistencyChecker<'p>,
    assignment: Assignment,
    stats: SearchStatistics,
}

impl<'p> BacktrackingSearch<'p> {
    /// `variables` must come from `puzzle.check_structure()`
    pub fn new(puzzle: &'p Puzzle, variables: &'p VariableSet, options: SearchOptions) -> Self {
        Self {
            puzzle,
            variables,
            options,
            domains: DomainProvider::new(puzzle, options.domain_rule),
            checker: ConsistencyChecker::new(puzzle, variables.len()),
            assignment: Assignment::new(),
            stats: SearchStatistics::default(),
        }
    }

    /// Run to the first solution. `None` means the space is exhausted.
    pub fn run(&mut self) -> Option<Assignment> {
        let found = self.backtrack();
        self.stats.consistency_checks = self.checker.checks();

        if found {
            Some(std::mem::take(&mut self.assignment))
        } else {
            None
        }
    }

    pub fn statistics(&self) -> SearchStatistics {
        self.stats
    }

    fn backtrack(&mut self) -> bool {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.assignment.len());

        if self.assignment.len() == self.variables.len() {
            return sum_holds(self.puzzle, &self.assignment);
        }

        let Some(var) = select_variable(
            self.options.variable_ordering,
            self.variables,
            &mut self.assignment,
            &self.domains,
            &self.checker,
        ) else {
            return false;
        };

        let candidates = order_values(
            self.options.value_ordering,
            var,
            self.domains.domain(var),
            self.variables,
            &mut self.assignment,
            &self.checker,
        );

        for digit in candidates {
            if !self.checker.is_consistent(var, digit, &mut self.assignment) {
                continue;
            }

            self.assignment.assign(var, digit);
            self.stats.assignments += 1;

            if self.backtrack() {
                return true;
            }

            self.assignment.unassign(var);
            self.stats.backtracks += 1;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(a: &str, b: &str, s: &str, options: SearchOptions) -> (Option<Assignment>, SearchStatistics) {
        let puzzle = Puzzle::new(a, b, s).unwrap();
        let variables = puzzle.check_structure().unwrap();
        let mut engine = BacktrackingSearch::new(&puzzle, &variables, options);
        let result = engine.run();
        (result, engine.statistics())
    }

    #[test]
    fn test_send_more_money() {
        let (result, stats) = search("SEND", "MORE", "MONEY", SearchOptions::default());
        let assignment = result.expect("SEND + MORE = MONEY has a solution");

        let expected = [
            ('D', 7), ('E', 5), ('M', 1), ('N', 6), ('O', 0), ('R', 8), ('S', 9), ('Y', 2),
        ];
        assert_eq!(assignment.to_map(), expected.into_iter().collect());
        assert_eq!(stats.max_depth, 8);
        assert!(stats.consistency_checks > 0);
    }

    #[test]
    fn test_every_option_combination_agrees() {
        let combos = [
            (DomainRule::General, VariableOrdering::Mrv, ValueOrdering::Lcv),
            (DomainRule::CarryAware, VariableOrdering::Mrv, ValueOrdering::Lcv),
            (DomainRule::General, VariableOrdering::Static, ValueOrdering::Ascending),
            (DomainRule::CarryAware, VariableOrdering::Static, ValueOrdering::Lcv),
        ];

        for (domain_rule, variable_ordering, value_ordering) in combos {
            let options = SearchOptions { domain_rule, variable_ordering, value_ordering };
            let (result, _) = search("SEND", "MORE", "MONEY", options);
            let assignment = result.unwrap();
            assert_eq!(assignment.get('M'), Some(1));
            assert_eq!(assignment.get('Y'), Some(2));
        }
    }

    #[test]
    fn test_exhausted() {
        // ABCD * 2 = ABCD * 10 + E has no solution with A > 0
        let (result, stats) = search("ABCD", "ABCD", "ABCDE", SearchOptions::default());
        assert!(result.is_none());
        assert!(stats.nodes > 1);
    }

    #[test]
    fn test_sum_two_longer_exhausts_quickly_with_carry_rule() {
        let carry = SearchOptions {
            domain_rule: DomainRule::CarryAware,
            ..SearchOptions::default()
        };
        let (general, general_stats) = search("A", "B", "CDE", SearchOptions::default());
        let (tight, tight_stats) = search("A", "B", "CDE", carry);

        assert!(general.is_none());
        assert!(tight.is_none());
        assert!(tight_stats.assignments <= general_stats.assignments);
    }

    #[test]
    fn test_backtracks_are_balanced() {
        let (result, stats) = search("TWO", "TWO", "FOUR", SearchOptions::default());
        let assignment = result.unwrap();

        // Every commit is either undone or part of the final assignment
        assert_eq!(stats.assignments, stats.backtracks + assignment.len() as u64);
    }

    #[test]
    fn test_deterministic() {
        let first = search("BASE", "BALL", "GAMES", SearchOptions::default());
        let second = search("BASE", "BALL", "GAMES", SearchOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_commit_passed_the_checker() {
        let puzzles = [
            ("SEND", "MORE", "MONEY"),
            ("TWO", "TWO", "FOUR"),
            ("BASE", "BALL", "GAMES"),
            ("A", "A", "B"),
        ];
        let option_sets = [
            SearchOptions::default(),
            SearchOptions {
                domain_rule: DomainRule::CarryAware,
                variable_ordering: VariableOrdering::Static,
                value_ordering: ValueOrdering::Ascending,
            },
        ];

        for (a, b, s) in puzzles {
            for options in option_sets {
                let puzzle = Puzzle::new(a, b, s).unwrap();
                let variables = puzzle.check_structure().unwrap();
                let assignment = BacktrackingSearch::new(&puzzle, &variables, options).run().unwrap();

                // Replay the commits in order; each must have been legal at its depth
                let checker = ConsistencyChecker::new(&puzzle, variables.len());
                let mut replay = Assignment::new();
                for (var, digit) in assignment.iter() {
                    assert!(
                        checker.is_consistent(var, digit, &mut replay),
                        "{} + {} = {}: {}={} fails after {:?}",
                        a, b, s, var, digit, replay.to_map()
                    );
                    replay.assign(var, digit);
                }
                assert_eq!(replay.len(), variables.len());
            }
        }
    }
}
