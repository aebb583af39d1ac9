//! Boardchat
//!
//! Collapsible chat overlay for a real-time board surface.
//!
//! The pure core lives in [`state`]: line wrapping, the scroll model, the
//! slide animator and region hit-testing, all driven through
//! [`state::ChatWidget`]. [`view`] is the impure shell that hosts the
//! widget in a terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod state;
pub mod view;
