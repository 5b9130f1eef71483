//! Configuration settings for the cryptarithm solver

use crate::csp::SearchOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub domain_rule: DomainRule,
    pub variable_ordering: VariableOrdering,
    pub value_ordering: ValueOrdering,
    /// Wall-clock bound per puzzle; `None` lets the search run to completion
    pub timeout_seconds: Option<u64>,
    /// Solve independent puzzles concurrently
    pub parallel: bool,
}

/// How candidate digits are generated before pruning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DomainRule {
    /// 0-9, without 0 for leading letters
    #[default]
    General,
    /// Like `General`, and the sum's leading letter is fixed to 1 when the
    /// sum is exactly one letter longer than the longer addend
    CarryAware,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VariableOrdering {
    /// Minimum remaining values
    #[default]
    Mrv,
    /// First unassigned letter in alphabetical order
    Static,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrdering {
    /// Least constraining value
    #[default]
    Lcv,
    /// Digits in ascending order
    Ascending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            domain_rule: DomainRule::General,
            variable_ordering: VariableOrdering::Mrv,
            value_ordering: ValueOrdering::Lcv,
            timeout_seconds: None,
            parallel: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            puzzle_files: vec![
                PathBuf::from("puzzles/input1.txt"),
                PathBuf::from("puzzles/input2.txt"),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_directory: PathBuf::from("output"),
        }
    }
}

impl SolverConfig {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            domain_rule: self.domain_rule,
            variable_ordering: self.variable_ordering,
            value_ordering: self.value_ordering,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl fmt::Display for DomainRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainRule::General => write!(f, "general"),
            DomainRule::CarryAware => write!(f, "carry-aware"),
        }
    }
}

impl fmt::Display for VariableOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableOrdering::Mrv => write!(f, "mrv"),
            VariableOrdering::Static => write!(f, "static"),
        }
    }
}

impl fmt::Display for ValueOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOrdering::Lcv => write!(f, "lcv"),
            ValueOrdering::Ascending => write!(f, "ascending"),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.timeout_seconds == Some(0) {
            anyhow::bail!("Timeout must be positive when set");
        }

        if self.input.puzzle_files.is_empty() {
            anyhow::bail!("No puzzle files configured");
        }

        for file in &self.input.puzzle_files {
            if !file.exists() {
                anyhow::bail!("Puzzle file does not exist: {}", file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if !cli_overrides.puzzle_files.is_empty() {
            self.input.puzzle_files = cli_overrides.puzzle_files.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = Some(timeout);
        }
        if let Some(rule) = cli_overrides.domain_rule {
            self.solver.domain_rule = rule;
        }
        if cli_overrides.parallel {
            self.solver.parallel = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub timeout_seconds: Option<u64>,
    pub domain_rule: Option<DomainRule>,
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.solver.domain_rule, DomainRule::General);
        assert_eq!(settings.solver.variable_ordering, VariableOrdering::Mrv);
        assert_eq!(settings.solver.value_ordering, ValueOrdering::Lcv);
        assert_eq!(settings.solver.timeout(), None);
        assert_eq!(settings.solver.search_options(), SearchOptions::default());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.solver.domain_rule = DomainRule::CarryAware;
        settings.solver.timeout_seconds = Some(30);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.domain_rule, DomainRule::CarryAware);
        assert_eq!(loaded.solver.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_yaml_spelling() {
        let yaml = "
solver:
  domain_rule: carry_aware
  variable_ordering: static
  value_ordering: ascending
  timeout_seconds: null
  parallel: true
input:
  puzzle_files: [a.txt]
output:
  format: text
  output_directory: out
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.solver.variable_ordering, VariableOrdering::Static);
        assert_eq!(settings.solver.value_ordering, ValueOrdering::Ascending);
        assert!(settings.solver.parallel);
    }

    #[test]
    fn test_validation() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("input1.txt");
        std::fs::write(&puzzle, "A\nA\nB\n").unwrap();

        let mut settings = Settings::default();
        settings.input.puzzle_files = vec![puzzle];
        assert!(settings.validate().is_ok());

        settings.solver.timeout_seconds = Some(0);
        assert!(settings.validate().is_err());

        settings.solver.timeout_seconds = None;
        settings.input.puzzle_files.push(temp_dir.path().join("missing.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            puzzle_files: vec![PathBuf::from("x.txt")],
            output_dir: Some(PathBuf::from("elsewhere")),
            format: Some(OutputFormat::Json),
            timeout_seconds: Some(5),
            domain_rule: Some(DomainRule::CarryAware),
            parallel: true,
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.input.puzzle_files, vec![PathBuf::from("x.txt")]);
        assert_eq!(settings.output.output_directory, PathBuf::from("elsewhere"));
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.solver.timeout_seconds, Some(5));
        assert_eq!(settings.solver.domain_rule, DomainRule::CarryAware);
        assert!(settings.solver.parallel);

        // Empty overrides leave everything alone
        settings.merge_with_cli(&CliOverrides::default());
        assert_eq!(settings.output.format, OutputFormat::Json);
    }
}
