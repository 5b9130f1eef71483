//! Variable selection (MRV) and value ordering (LCV)

use super::{Assignment, ConsistencyChecker, DomainProvider, VariableSet};
use crate::config::{ValueOrdering, VariableOrdering};
use std::cmp::Reverse;

/// Next variable to branch on, or `None` when every variable is assigned
pub fn select_variable(
    ordering: VariableOrdering,
    variables: &VariableSet,
    assignment: &mut Assignment,
    domains: &DomainProvider,
    checker: &ConsistencyChecker<'_>,
) -> Option<char> {
    match ordering {
        VariableOrdering::Mrv => select_unassigned_variable(variables, assignment, domains, checker),
        VariableOrdering::Static => variables.iter().find(|&var| !assignment.is_assigned(var)),
    }
}

/// Minimum remaining values: the unassigned variable with the fewest digits
/// that pass the checker. Ties keep the earliest variable.
pub fn select_unassigned_variable(
    variables: &VariableSet,
    assignment: &mut Assignment,
    domains: &DomainProvider,
    checker: &ConsistencyChecker<'_>,
) -> Option<char> {
    let mut best: Option<(char, usize)> = None;

    for var in variables.iter() {
        if assignment.is_assigned(var) {
            continue;
        }

        let remaining = domains
            .domain(var)
            .into_iter()
            .filter(|&digit| checker.is_consistent(var, digit, assignment))
            .count();

        if best.map_or(true, |(_, fewest)| remaining < fewest) {
            best = Some((var, remaining));
        }
    }

    best.map(|(var, _)| var)
}

/// Order `candidates` for `var` according to `ordering`
pub fn order_values(
    ordering: ValueOrdering,
    var: char,
    candidates: Vec<u8>,
    variables: &VariableSet,
    assignment: &mut Assignment,
    checker: &ConsistencyChecker<'_>,
) -> Vec<u8> {
    match ordering {
        ValueOrdering::Lcv => order_domain_values(var, candidates, variables, assignment, checker),
        ValueOrdering::Ascending => candidates,
    }
}

/// Least constraining value: candidates that leave the most legal
/// (variable, digit) pairs for the other unassigned variables come first.
/// Equal scores keep their incoming order.
pub fn order_domain_values(
    var: char,
    candidates: Vec<u8>,
    variables: &VariableSet,
    assignment: &mut Assignment,
    checker: &ConsistencyChecker<'_>,
) -> Vec<u8> {
    let mut scored: Vec<(u8, usize)> = candidates
        .into_iter()
        .map(|digit| (digit, freedom_score(var, digit, variables, assignment, checker)))
        .collect();

    scored.sort_by_key(|&(_, score)| Reverse(score));
    scored.into_iter().map(|(digit, _)| digit).collect()
}

/// Legal (other variable, digit) pairs left once `var = digit`
pub fn freedom_score(
    var: char,
    digit: u8,
    variables: &VariableSet,
    assignment: &mut Assignment,
    checker: &ConsistencyChecker<'_>,
) -> usize {
    // A taken digit is rejected by the search anyway; never put it in the assignment
    if assignment.uses_digit(digit) || assignment.is_assigned(var) {
        return 0;
    }

    assignment.with_trial(var, digit, |trial| {
        let mut count = 0;
        for other in variables.iter() {
            if trial.is_assigned(other) {
                continue;
            }
            for other_digit in 0..=9u8 {
                if !trial.uses_digit(other_digit) && checker.is_consistent(other, other_digit, trial) {
                    count += 1;
                }
            }
        }
        count
    })
}
