//! Constraint model and backtracking search for cryptarithms

pub mod assignment;
pub mod consistency;
pub mod domain;
pub mod error;
pub mod heuristics;
pub mod search;
pub mod variables;

pub use assignment::Assignment;
pub use consistency::{sum_holds, ConsistencyChecker};
pub use domain::DomainProvider;
pub use error::{InputError, Unsolvable};
pub use search::{BacktrackingSearch, SearchOptions, SearchStatistics};
pub use variables::{extract_letters, VariableSet};
