//! Cryptarithm problem definition and runner

use super::Solution;
use crate::config::{ValueOrdering, VariableOrdering};
use crate::csp::{BacktrackingSearch, DomainProvider, SearchOptions, SearchStatistics, Unsolvable};
use crate::puzzle::{load_puzzle_from_file, Puzzle};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// A puzzle together with the options used to search it
pub struct CryptarithmProblem {
    puzzle: Puzzle,
    options: SearchOptions,
    statistics: SearchStatistics,
}

/// What happened to one puzzle, as reported to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PuzzleOutcome {
    Solved { solution: Solution },
    NoSolution { puzzle: Puzzle, statistics: SearchStatistics },
    Rejected { puzzle: Puzzle, reason: String },
    TimedOut { puzzle: Puzzle, seconds: u64 },
}

impl CryptarithmProblem {
    pub fn new(puzzle: Puzzle, options: SearchOptions) -> Self {
        Self {
            puzzle,
            options,
            statistics: SearchStatistics::default(),
        }
    }

    /// Load the puzzle from a three-line file
    pub fn from_file<P: AsRef<Path>>(path: P, options: SearchOptions) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&path)
            .with_context(|| format!("Failed to load puzzle from {}", path.as_ref().display()))?;
        Ok(Self::new(puzzle, options))
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Statistics of the last `solve`; all zero when the puzzle was rejected
    /// before searching
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Search for the first solution
    pub fn solve(&mut self) -> Result<Solution, Unsolvable> {
        let start_time = Instant::now();
        self.statistics = SearchStatistics::default();

        let variables = self.puzzle.check_structure()?;

        let mut search = BacktrackingSearch::new(&self.puzzle, &variables, self.options);
        let found = search.run();
        self.statistics = search.statistics();

        let assignment = found.ok_or(Unsolvable::SearchExhausted)?;
        let solution =
            Solution::from_assignment(&self.puzzle, &assignment, self.statistics, start_time.elapsed())
                .expect("successful search assigns every letter");
        Ok(solution)
    }

    /// Solve, giving up after `timeout` if one is set.
    ///
    /// The search itself cannot be interrupted; on timeout the worker thread
    /// is left to finish on its own and its answer is dropped.
    pub fn run(&mut self, timeout: Option<Duration>) -> PuzzleOutcome {
        log::debug!("Solving {} with {:?}", self.puzzle, self.options);

        let Some(limit) = timeout else {
            let result = self.solve();
            return self.outcome(result);
        };

        let (sender, receiver) = mpsc::channel();
        let mut worker = CryptarithmProblem::new(self.puzzle.clone(), self.options);
        std::thread::spawn(move || {
            let result = worker.solve();
            // The receiver is gone if we already timed out
            let _ = sender.send((result, worker.statistics()));
        });

        match receiver.recv_timeout(limit) {
            Ok((result, statistics)) => {
                self.statistics = statistics;
                self.outcome(result)
            }
            Err(_) => {
                log::warn!("Gave up on {} after {}s", self.puzzle, limit.as_secs());
                PuzzleOutcome::TimedOut {
                    puzzle: self.puzzle.clone(),
                    seconds: limit.as_secs(),
                }
            }
        }
    }

    fn outcome(&self, result: Result<Solution, Unsolvable>) -> PuzzleOutcome {
        log::debug!("{}: {:?}", self.puzzle, self.statistics);

        match result {
            Ok(solution) => PuzzleOutcome::Solved { solution },
            Err(reason) if reason.is_search_exhausted() => PuzzleOutcome::NoSolution {
                puzzle: self.puzzle.clone(),
                statistics: self.statistics,
            },
            Err(reason) => {
                if reason.is_structural() {
                    log::info!("{} rejected before search: {}", self.puzzle, reason);
                }
                PuzzleOutcome::Rejected {
                    puzzle: self.puzzle.clone(),
                    reason: reason.to_string(),
                }
            }
        }
    }

    /// Size of the search space before and after the structural rules
    pub fn estimate_search_space(&self) -> Result<SearchSpaceEstimate, Unsolvable> {
        let variables = self.puzzle.check_structure()?;
        let domains = DomainProvider::new(&self.puzzle, self.options.domain_rule);

        let domain_sizes: Vec<(char, usize)> = variables
            .iter()
            .map(|letter| (letter, domains.domain(letter).len()))
            .collect();

        // Injective maps from n letters into 10 digits: 10!/(10-n)!
        let injective_maps: u64 = (0..variables.len() as u64).map(|i| 10 - i).product();
        let domain_product: u64 = domain_sizes.iter().map(|&(_, size)| size as u64).product();

        Ok(SearchSpaceEstimate {
            letters: variables.len(),
            leading_letters: self.puzzle.leading_letters().to_vec(),
            domain_sizes,
            injective_maps,
            domain_product,
        })
    }

    /// Solve the puzzle once per heuristic combination, concurrently
    pub fn compare_heuristics(&self) -> Vec<HeuristicRun> {
        HeuristicRun::COMBINATIONS
            .par_iter()
            .map(|&(variable_ordering, value_ordering)| {
                let options = SearchOptions {
                    variable_ordering,
                    value_ordering,
                    ..self.options
                };
                let start_time = Instant::now();
                let mut problem = CryptarithmProblem::new(self.puzzle.clone(), options);
                let solved = problem.solve().is_ok();

                HeuristicRun {
                    options,
                    solved,
                    statistics: problem.statistics(),
                    elapsed: start_time.elapsed(),
                }
            })
            .collect()
    }
}

impl PuzzleOutcome {
    pub fn puzzle(&self) -> &Puzzle {
        match self {
            PuzzleOutcome::Solved { solution } => &solution.puzzle,
            PuzzleOutcome::NoSolution { puzzle, .. }
            | PuzzleOutcome::Rejected { puzzle, .. }
            | PuzzleOutcome::TimedOut { puzzle, .. } => puzzle,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            PuzzleOutcome::Solved { solution } => Some(solution),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read back an outcome written with `OutputFormat::Json`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Static facts about a puzzle's search space
#[derive(Debug, Clone)]
pub struct SearchSpaceEstimate {
    pub letters: usize,
    pub leading_letters: Vec<char>,
    pub domain_sizes: Vec<(char, usize)>,
    /// Letter-to-digit maps with all digits distinct
    pub injective_maps: u64,
    /// Product of raw domain sizes, ignoring distinctness
    pub domain_product: u64,
}

/// One search under a particular heuristic combination
#[derive(Debug, Clone)]
pub struct HeuristicRun {
    pub options: SearchOptions,
    pub solved: bool,
    pub statistics: SearchStatistics,
    pub elapsed: Duration,
}

impl HeuristicRun {
    pub const COMBINATIONS: [(VariableOrdering, ValueOrdering); 4] = [
        (VariableOrdering::Mrv, ValueOrdering::Lcv),
        (VariableOrdering::Mrv, ValueOrdering::Ascending),
        (VariableOrdering::Static, ValueOrdering::Lcv),
        (VariableOrdering::Static, ValueOrdering::Ascending),
    ];
}

impl std::fmt::Display for SearchSpaceEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Space:")?;
        writeln!(f, "  Distinct letters: {}", self.letters)?;
        let leading: String = self.leading_letters.iter().collect();
        writeln!(f, "  Leading letters: {}", leading)?;
        writeln!(f, "  Injective assignments: {}", self.injective_maps)?;
        writeln!(f, "  Product of domains: {}", self.domain_product)?;
        writeln!(f, "  Domains:")?;
        for (letter, size) in &self.domain_sizes {
            writeln!(f, "    {}: {} candidates", letter, size)?;
        }
        Ok(())
    }
}
