//! Reading puzzles from text files

use super::Puzzle;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a puzzle from a text file
/// Format: three lines holding the first addend, the second addend and the sum
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<Puzzle> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse the three-line puzzle format
pub fn parse_puzzle_from_string(content: &str) -> Result<Puzzle> {
    let lines: Vec<&str> = content.lines().map(|line| line.trim()).collect();

    // Trailing blank lines are tolerated, anything else after the sum is not
    let used = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);

    if used < 3 {
        anyhow::bail!("Puzzle file must contain three lines (addend, addend, sum), found {}", used);
    }
    if used > 3 {
        anyhow::bail!("Puzzle file has more lines than expected: {} non-blank lines after the sum", used - 3);
    }

    Ok(Puzzle::new(lines[0], lines[1], lines[2])?)
}

/// Save a puzzle in the three-line format
pub fn save_puzzle_to_file<P: AsRef<Path>>(puzzle: &Puzzle, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = format!("{}\n{}\n{}\n", puzzle.addend1(), puzzle.addend2(), puzzle.sum());
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// The fixed puzzles used by `demo` and written by `setup`
pub fn example_puzzles() -> Vec<(&'static str, Puzzle)> {
    [
        ("input1", "SEND", "MORE", "MONEY"),
        ("input2", "TWO", "TWO", "FOUR"),
        ("input3", "BASE", "BALL", "GAMES"),
        ("input4", "A", "A", "B"),
        ("input5", "ABCD", "ABCD", "ABCDE"),
    ]
    .into_iter()
    .filter_map(|(name, a, b, s)| Puzzle::new(a, b, s).ok().map(|p| (name, p)))
    .collect()
}

/// Create example puzzle files for testing
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, puzzle) in example_puzzles() {
        save_puzzle_to_file(&puzzle, dir.join(format!("{}.txt", name)))?;
    }

    Ok(())
}
