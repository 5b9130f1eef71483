//! Validated puzzle words

use crate::csp::{Assignment, InputError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-empty word of uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Validate `text` as a word. `role` names the word in error messages.
    pub fn new(text: &str, role: &'static str) -> Result<Self, InputError> {
        if text.is_empty() {
            return Err(InputError::EmptyWord { role });
        }

        if let Some((position, ch)) = text.chars().enumerate().find(|(_, c)| !c.is_ascii_uppercase()) {
            return Err(InputError::InvalidCharacter {
                role,
                word: text.to_string(),
                ch,
                position,
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The letter that may never stand for 0
    pub fn leading_letter(&self) -> char {
        // non-empty by construction
        self.0.as_bytes()[0] as char
    }

    /// The letter in the `column`-th position counting from the right (0 = units)
    pub fn letter_from_right(&self, column: usize) -> Option<char> {
        let bytes = self.0.as_bytes();
        if column < bytes.len() {
            Some(bytes[bytes.len() - 1 - column] as char)
        } else {
            None
        }
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Replace each letter by its digit, or `None` if any letter is unassigned
    pub fn render(&self, assignment: &Assignment) -> Option<String> {
        self.letters()
            .map(|letter| assignment.get(letter).map(|digit| char::from(b'0' + digit)))
            .collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::new(&value, "word")
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}
