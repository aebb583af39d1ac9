//! Domain model types (pure).
//!
//! Plain data shared by the widget core and the terminal host.

pub mod display_line;
pub mod error;
pub mod geometry;
pub mod key_action;

// Re-export for convenience
pub use display_line::DisplayLine;
pub use error::{AppError, ConfigError, FeedError, LoggingError};
pub use geometry::{Point, PxRect, Size};
pub use key_action::{ChatKey, KeyAction};
