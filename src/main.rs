//! Main CLI application for the cryptarithm solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cryptarithm_solver::{
    config::{CliOverrides, DomainRule, OutputFormat, Settings},
    puzzle::{create_example_puzzles, example_puzzles, load_puzzle_from_file, Puzzle},
    solver::{CryptarithmProblem, PuzzleOutcome, SolutionValidator},
    utils::{init_logger, ColorOutput, SolutionFormatter},
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cryptarithm_solver")]
#[command(about = "Cryptarithm solver: WORD + WORD = WORD by backtracking search")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve puzzle files and write the answers to the output directory
    Solve {
        /// Puzzle files (override config)
        puzzles: Vec<PathBuf>,

        /// Solve a one-line equation such as "SEND + MORE = MONEY" instead
        #[arg(short, long)]
        equation: Option<String>,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Give up on a puzzle after this many seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Candidate digit rule (overrides config)
        #[arg(long, value_enum)]
        domain_rule: Option<DomainRule>,

        /// Solve several puzzles concurrently
        #[arg(long)]
        parallel: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a written solution against its puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solution file written by `solve` (`.txt` or `.json`)
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Show a puzzle's search space and compare search heuristics on it
    Analyze {
        /// Puzzle file
        #[arg(short, long, conflicts_with = "equation")]
        puzzle: Option<PathBuf>,

        /// One-line equation
        #[arg(short, long)]
        equation: Option<String>,

        /// Candidate digit rule
        #[arg(long, value_enum, default_value_t = DomainRule::General)]
        domain_rule: DomainRule,
    },

    /// Solve the built-in example puzzles
    Demo {
        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            puzzles, equation, config, output, format,
            timeout, domain_rule, parallel, verbose,
        } => {
            init_logger(verbose);
            let overrides = CliOverrides {
                puzzle_files: puzzles,
                output_dir: output,
                format,
                timeout_seconds: timeout,
                domain_rule,
                parallel,
            };
            solve_command(config, overrides, equation, verbose)
        }
        Commands::Setup { directory, force } => {
            init_logger(false);
            setup_command(directory, force)
        }
        Commands::Validate { puzzle, solution } => {
            init_logger(false);
            validate_command(puzzle, solution)
        }
        Commands::Analyze { puzzle, equation, domain_rule } => {
            init_logger(false);
            analyze_command(puzzle, equation, domain_rule)
        }
        Commands::Demo { verbose } => {
            init_logger(verbose);
            demo_command(verbose)
        }
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::info!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    equation: Option<String>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    let options = settings.solver.search_options();
    let timeout = settings.solver.timeout();

    if verbose {
        println!("Configuration:");
        println!("  Domain rule: {}", settings.solver.domain_rule);
        println!("  Variable ordering: {}", settings.solver.variable_ordering);
        println!("  Value ordering: {}", settings.solver.value_ordering);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    // A single equation from the command line is printed, not written to disk
    if let Some(equation) = equation {
        let puzzle = equation.parse::<Puzzle>().context("Invalid equation")?;
        let outcome = CryptarithmProblem::new(puzzle, options).run(timeout);
        print_outcome(&outcome, verbose);
        return Ok(());
    }

    settings.validate().context("Configuration validation failed")?;

    println!("{}", ColorOutput::info(&format!(
        "🔄 Solving {} puzzle(s)...", settings.input.puzzle_files.len()
    )));
    let start_time = Instant::now();

    let solve_file = |path: &PathBuf| -> Result<(PathBuf, PuzzleOutcome)> {
        let mut problem = CryptarithmProblem::from_file(path, options)?;
        Ok((path.clone(), problem.run(timeout)))
    };

    let results: Vec<Result<(PathBuf, PuzzleOutcome)>> = if settings.solver.parallel {
        settings.input.puzzle_files.par_iter().map(solve_file).collect()
    } else {
        settings.input.puzzle_files.iter().map(solve_file).collect()
    };

    let mut outcomes = Vec::new();
    for result in results {
        let (path, outcome) = match result {
            Ok(pair) => pair,
            Err(e) => {
                println!("{}", ColorOutput::error(&format!("Error: {:#}", e)));
                continue;
            }
        };

        print_outcome(&outcome, verbose);

        let output_path = SolutionFormatter::output_path(
            &settings.output.output_directory,
            &path,
            settings.output.format,
        );
        SolutionFormatter::save_outcome(&outcome, &output_path, settings.output.format)
            .context("Failed to save solution")?;
        println!("Solution written to {}\n", output_path.display());

        outcomes.push(outcome);
    }

    if settings.output.format == OutputFormat::Json && !outcomes.is_empty() {
        let summary = SolutionFormatter::save_summary(&outcomes, &settings.output.output_directory)?;
        println!("Summary written to {}", summary.display());
    }

    let solved = outcomes.iter().filter(|o| o.solution().is_some()).count();
    println!("{}", ColorOutput::success(&format!(
        "✅ Solved {} of {} puzzle(s) in {:.3}s",
        solved,
        settings.input.puzzle_files.len(),
        start_time.elapsed().as_secs_f64()
    )));

    Ok(())
}

fn print_outcome(outcome: &PuzzleOutcome, verbose: bool) {
    let text = SolutionFormatter::format_outcome(outcome, verbose);
    match outcome {
        PuzzleOutcome::Solved { .. } => println!("{}", text),
        PuzzleOutcome::NoSolution { .. } => println!("{}", ColorOutput::warning(&text)),
        PuzzleOutcome::Rejected { .. } | PuzzleOutcome::TimedOut { .. } => {
            println!("{}", ColorOutput::error(&text))
        }
    }
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.puzzle_files = example_puzzles()
            .into_iter()
            .map(|(name, _)| puzzle_dir.join(format!("{}.txt", name)))
            .collect();
        settings.output.output_directory = output_dir.clone();
        settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&puzzle_dir)
        .context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzles to {}", puzzle_dir.display());
    println!("3. Run: cargo run -- solve --config {}", config_path.display());

    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating solution..."));

    let puzzle = load_puzzle_from_file(&puzzle_path)?;
    let result = SolutionValidator::validate_output_file(&puzzle, &solution_path)
        .context("Validation failed")?;

    println!("Puzzle: {}", puzzle);
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("❌ Solution is invalid"));
    }

    Ok(())
}

fn analyze_command(
    puzzle_path: Option<PathBuf>,
    equation: Option<String>,
    domain_rule: DomainRule,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing puzzle..."));

    let puzzle = match (puzzle_path, equation) {
        (Some(path), _) => load_puzzle_from_file(&path)?,
        (None, Some(equation)) => equation.parse::<Puzzle>().context("Invalid equation")?,
        (None, None) => anyhow::bail!("Pass either --puzzle or --equation"),
    };

    println!("{}", SolutionFormatter::format_column_sum(&puzzle, None));

    let mut options = Settings::default().solver.search_options();
    options.domain_rule = domain_rule;
    let problem = CryptarithmProblem::new(puzzle, options);

    match problem.estimate_search_space() {
        Ok(estimate) => println!("{}", estimate),
        Err(reason) => {
            println!("{}", ColorOutput::error(&format!("Invalid puzzle: {}", reason)));
            return Ok(());
        }
    }

    println!("{}", SolutionFormatter::format_comparison(&problem.compare_heuristics()));

    Ok(())
}

fn demo_command(verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🧮 Solving example puzzles..."));
    let options = Settings::default().solver.search_options();

    for (name, puzzle) in example_puzzles() {
        println!("[{}]", name);
        let outcome = CryptarithmProblem::new(puzzle, options).run(None);
        print_outcome(&outcome, verbose);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "cryptarithm_solver",
            "solve",
            "puzzles/input1.txt",
            "puzzles/input2.txt",
            "--format", "json",
            "--domain-rule", "carry-aware",
            "--timeout", "5",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from([
            "cryptarithm_solver",
            "analyze",
            "--puzzle", "a.txt",
            "--equation", "A + A = B",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_then_solve() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        assert!(config.exists());
        assert!(temp_dir.path().join("puzzles/input1.txt").exists());

        let overrides = CliOverrides {
            puzzle_files: vec![
                temp_dir.path().join("puzzles/input1.txt"),
                temp_dir.path().join("puzzles/input5.txt"),
            ],
            parallel: true,
            ..CliOverrides::default()
        };
        solve_command(config, overrides, None, false).unwrap();

        let output = temp_dir.path().join("output");
        let solved = std::fs::read_to_string(output.join("output_input1.txt")).unwrap();
        assert_eq!(solved, "9567\n1085\n10652\n");
        let unsolved = std::fs::read_to_string(output.join("output_input5.txt")).unwrap();
        assert_eq!(unsolved, "No solution\n");

        validate_command(
            temp_dir.path().join("puzzles/input1.txt"),
            output.join("output_input1.txt"),
        )
        .unwrap();
    }

    #[test]
    fn test_json_output_validates() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        let puzzles = temp_dir.path().join("puzzles");

        let overrides = CliOverrides {
            puzzle_files: vec![puzzles.join("input2.txt"), puzzles.join("input5.txt")],
            format: Some(OutputFormat::Json),
            ..CliOverrides::default()
        };
        solve_command(temp_dir.path().join("config/default.yaml"), overrides, None, false).unwrap();

        let output = temp_dir.path().join("output");
        assert!(output.join("solutions_summary.json").exists());

        for name in ["input2", "input5"] {
            let puzzle = load_puzzle_from_file(puzzles.join(format!("{}.txt", name))).unwrap();
            let solution = output.join(format!("output_{}.json", name));
            let result = SolutionValidator::validate_output_file(&puzzle, &solution).unwrap();
            assert!(result.is_valid, "{}: {}", name, result);
            validate_command(puzzles.join(format!("{}.txt", name)), solution).unwrap();
        }
    }

    #[test]
    fn test_solve_equation_without_files() {
        let temp_dir = tempdir().unwrap();
        let result = solve_command(
            temp_dir.path().join("missing.yaml"),
            CliOverrides::default(),
            Some("TWO + TWO = FOUR".to_string()),
            false,
        );
        assert!(result.is_ok());

        let result = solve_command(
            temp_dir.path().join("missing.yaml"),
            CliOverrides::default(),
            Some("TWO TWO FOUR".to_string()),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_requires_input() {
        assert!(analyze_command(None, None, DomainRule::General).is_err());
        assert!(analyze_command(None, Some("A + A = B".to_string()), DomainRule::CarryAware).is_ok());
    }
}
