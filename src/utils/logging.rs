//! Diagnostic logging setup for the command-line tool

use log::LevelFilter;

/// Initialize `env_logger`.
///
/// `verbose` lowers the default level to `Debug`; `RUST_LOG` overrides both.
/// Calling this more than once is harmless.
pub fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {:?} level", level);
    }
}
