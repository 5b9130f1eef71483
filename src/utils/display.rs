//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::csp::SearchStatistics;
use crate::puzzle::Puzzle;
use crate::solver::{
    HeuristicRun, PuzzleOutcome, Solution, INVALID_PUZZLE_MARKER, NO_SOLUTION_MARKER, TIMED_OUT_MARKER,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

/// One line of `solutions_summary.json`
#[derive(Debug, Serialize)]
pub struct OutcomeSummary {
    pub puzzle: String,
    pub status: &'static str,
    pub answer: Option<String>,
}

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_statistics: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", solution.puzzle));
        output.push_str(&Self::format_column_sum(&solution.puzzle, Some(solution)));
        output.push('\n');
        output.push_str(&format!("Assignment: {}\n", solution.mapping()));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));

        if show_statistics {
            output.push_str(&Self::format_statistics(&solution.statistics));
        }

        output
    }

    /// Lay the sum out in columns, letters on the left and digits on the right
    ///
    /// ```text
    ///    SEND     9567
    /// +  MORE  +  1085
    /// -------  -------
    ///   MONEY    10652
    /// ```
    pub fn format_column_sum(puzzle: &Puzzle, solution: Option<&Solution>) -> String {
        let width = puzzle.sum().len() + 2;
        let rule = "-".repeat(width);
        let words = puzzle.words();
        let digits = solution.map(Solution::rendered);

        let mut output = String::new();
        for (row, prefix) in ["", "+", ""].iter().enumerate() {
            if row == 2 {
                output.push_str(&rule);
                if digits.is_some() {
                    output.push_str("  ");
                    output.push_str(&rule);
                }
                output.push('\n');
            }

            let word = words[row].as_str();
            output.push_str(&format!("{}{:>w$}", prefix, word, w = width - prefix.len()));
            if let Some(digits) = digits {
                output.push_str(&format!("  {}{:>w$}", prefix, digits[row], w = width - prefix.len()));
            }
            output.push('\n');
        }

        output
    }

    /// Format search statistics
    pub fn format_statistics(stats: &SearchStatistics) -> String {
        let mut output = String::new();
        output.push_str("Search Statistics:\n");
        output.push_str(&format!("  Nodes: {}\n", stats.nodes));
        output.push_str(&format!("  Assignments: {}\n", stats.assignments));
        output.push_str(&format!("  Backtracks: {}\n", stats.backtracks));
        output.push_str(&format!("  Consistency checks: {}\n", stats.consistency_checks));
        output.push_str(&format!("  Max depth: {}\n", stats.max_depth));
        output
    }

    /// Format any outcome for console output
    pub fn format_outcome(outcome: &PuzzleOutcome, show_statistics: bool) -> String {
        match outcome {
            PuzzleOutcome::Solved { solution } => Self::format_solution(solution, show_statistics),
            PuzzleOutcome::NoSolution { puzzle, statistics } => {
                let mut output = format!("=== {} ===\n{}\n", puzzle, NO_SOLUTION_MARKER);
                if show_statistics {
                    output.push_str(&Self::format_statistics(statistics));
                }
                output
            }
            PuzzleOutcome::Rejected { puzzle, reason } => {
                format!("=== {} ===\n{}: {}\n", puzzle, INVALID_PUZZLE_MARKER, reason)
            }
            PuzzleOutcome::TimedOut { puzzle, seconds } => {
                format!("=== {} ===\n{} after {}s\n", puzzle, TIMED_OUT_MARKER, seconds)
            }
        }
    }

    /// Format heuristic comparison runs as a table
    pub fn format_comparison(runs: &[HeuristicRun]) -> String {
        let mut output = String::new();

        output.push_str("Heuristic Comparison:\n");
        output.push_str("Variables | Values    | Solved | Nodes    | Backtracks | Checks     | Time(ms)\n");
        output.push_str("----------|-----------|--------|----------|------------|------------|---------\n");

        for run in runs {
            output.push_str(&format!(
                "{:9} | {:9} | {:6} | {:8} | {:10} | {:10} | {:8}\n",
                run.options.variable_ordering.to_string(),
                run.options.value_ordering.to_string(),
                if run.solved { "yes" } else { "no" },
                run.statistics.nodes,
                run.statistics.backtracks,
                run.statistics.consistency_checks,
                run.elapsed.as_millis()
            ));
        }

        output
    }

    /// Contents of a text output file: the three digit lines, or one marker line
    pub fn render_text(outcome: &PuzzleOutcome) -> String {
        match outcome {
            PuzzleOutcome::Solved { solution } => {
                format!("{}\n{}\n{}\n", solution.addend1, solution.addend2, solution.sum)
            }
            PuzzleOutcome::NoSolution { .. } => format!("{}\n", NO_SOLUTION_MARKER),
            PuzzleOutcome::Rejected { reason, .. } => format!("{}: {}\n", INVALID_PUZZLE_MARKER, reason),
            PuzzleOutcome::TimedOut { seconds, .. } => format!("{} after {}s\n", TIMED_OUT_MARKER, seconds),
        }
    }

    /// `output/output_input1.txt` for `puzzles/input1.txt`
    pub fn output_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("puzzle");
        let extension = match format {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        };
        output_dir.join(format!("output_{}.{}", stem, extension))
    }

    /// Write one outcome in the requested format
    pub fn save_outcome<P: AsRef<Path>>(outcome: &PuzzleOutcome, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = match format {
            OutputFormat::Text => Self::render_text(outcome),
            OutputFormat::Json => outcome.to_json().context("Failed to serialize outcome")?,
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write solution to {}", path.display()))?;

        Ok(())
    }

    /// Write `solutions_summary.json` covering every outcome
    pub fn save_summary<P: AsRef<Path>>(outcomes: &[PuzzleOutcome], output_dir: P) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let summaries: Vec<OutcomeSummary> = outcomes.iter().map(Self::summarize).collect();
        let summary_path = output_dir.join("solutions_summary.json");
        let summary_json = serde_json::to_string_pretty(&summaries)?;
        std::fs::write(&summary_path, summary_json)
            .with_context(|| format!("Failed to write {}", summary_path.display()))?;

        Ok(summary_path)
    }

    fn summarize(outcome: &PuzzleOutcome) -> OutcomeSummary {
        let status = match outcome {
            PuzzleOutcome::Solved { .. } => "solved",
            PuzzleOutcome::NoSolution { .. } => "no_solution",
            PuzzleOutcome::Rejected { .. } => "rejected",
            PuzzleOutcome::TimedOut { .. } => "timed_out",
        };

        OutcomeSummary {
            puzzle: outcome.puzzle().to_string(),
            status,
            answer: outcome.solution().map(Solution::equation),
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
