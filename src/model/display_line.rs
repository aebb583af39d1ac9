//! Wrapped chat log lines.

use std::fmt;

/// One already width-fitted line of chat text.
///
/// Only the line-wrap buffer constructs these, and nothing mutates them
/// afterwards. The single exception to "fits the budget" is a lone word that
/// is wider than the budget on its own; such words are never split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DisplayLine(String);

impl DisplayLine {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The line text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for DisplayLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
