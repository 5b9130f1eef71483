//! Console output and logging helpers

pub mod display;
pub mod logging;

pub use display::{Color, ColorOutput, SolutionFormatter};
pub use logging::init_logger;
