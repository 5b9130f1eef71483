//! Configuration management for the cryptarithm solver

pub mod settings;

pub use settings::{
    CliOverrides, DomainRule, InputConfig, OutputConfig, OutputFormat, Settings, SolverConfig,
    ValueOrdering, VariableOrdering,
};
