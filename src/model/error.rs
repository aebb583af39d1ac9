//! Error types for boardchat.
//!
//! The widget core is total and never fails: every degenerate input is
//! absorbed by clamping. Errors only arise in the impure shell around it
//! (configuration files, the log sink, the terminal).
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping every shell failure
//!   - [`ConfigError`] - Config file reading, parsing, or validation
//!   - [`LoggingError`] - Tracing subscriber setup
//!   - [`FeedError`] - Opening the simulated chat feed
//!   - `std::io::Error` - Terminal failures
//!
//! The terminal host reports `TuiError`, which wraps either an I/O failure
//! or an `AppError` and flattens back into `AppError` at the top.

use thiserror::Error;

use crate::view::TuiError;

pub use crate::config::loader::ConfigError;
pub use crate::logging::LoggingError;
pub use crate::session::FeedError;

/// Top-level application error encompassing all failure modes.
///
/// Domain-specific errors convert via `From`, so `main` can propagate them
/// with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    ///
    /// **Recovery**: Fatal. Report the offending path or field and exit.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    ///
    /// **Recovery**: Fatal at startup.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The `--feed` file could not be loaded.
    ///
    /// **Recovery**: Fatal at startup.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Terminal I/O failed.
    ///
    /// **Recovery**: Restore the terminal, print to stderr, exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(err) => AppError::Terminal(err),
            TuiError::App(err) => err,
        }
    }
}
