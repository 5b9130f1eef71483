//! Puzzle model and file format

pub mod equation;
pub mod io;
pub mod word;

pub use equation::{Puzzle, MAX_LETTERS};
pub use io::{create_example_puzzles, example_puzzles, load_puzzle_from_file, save_puzzle_to_file};
pub use word::Word;
