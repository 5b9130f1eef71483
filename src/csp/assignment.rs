//! Partial letter-to-digit mapping mutated in place during search

use std::collections::BTreeMap;

/// Letter-to-digit mapping with strict assign/unassign discipline.
///
/// Entries are kept in assignment order so the most recent trial is always
/// the one removed. A bit mask tracks which digits are taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(char, u8)>,
    used: u16,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Digit currently assigned to `var`
    pub fn get(&self, var: char) -> Option<u8> {
        self.entries
            .iter()
            .find(|(letter, _)| *letter == var)
            .map(|&(_, digit)| digit)
    }

    pub fn is_assigned(&self, var: char) -> bool {
        self.get(var).is_some()
    }

    /// Whether some variable already holds `digit`
    pub fn uses_digit(&self, digit: u8) -> bool {
        digit <= 9 && self.used & (1 << digit) != 0
    }

    /// Assign `digit` to `var`.
    ///
    /// The caller guarantees `var` is unassigned and `digit` is free; the
    /// consistency checker is the gate for both.
    pub fn assign(&mut self, var: char, digit: u8) {
        debug_assert!(digit <= 9, "digit {} out of range", digit);
        debug_assert!(!self.is_assigned(var), "{} is already assigned", var);
        debug_assert!(!self.uses_digit(digit), "digit {} is already used", digit);

        self.entries.push((var, digit));
        self.used |= 1 << digit;
    }

    /// Remove the entry for `var`, returning its digit
    pub fn unassign(&mut self, var: char) -> Option<u8> {
        let position = self.entries.iter().rposition(|(letter, _)| *letter == var)?;
        let (_, digit) = self.entries.remove(position);
        self.used &= !(1 << digit);
        Some(digit)
    }

    /// Run `f` with `var = digit` tentatively assigned, then remove it again.
    ///
    /// The entry is removed before returning no matter what `f` computed, so
    /// the assignment is left exactly as it was found.
    pub fn with_trial<R>(&mut self, var: char, digit: u8, f: impl FnOnce(&mut Self) -> R) -> R {
        self.assign(var, digit);
        let result = f(self);
        self.unassign(var);
        result
    }

    /// Entries in assignment order
    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.entries.iter().copied()
    }

    /// Snapshot keyed by letter
    pub fn to_map(&self) -> BTreeMap<char, u8> {
        self.entries.iter().copied().collect()
    }
}
