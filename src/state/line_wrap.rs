//! Append-only chat log with greedy word-wrap reflow.

use crate::model::DisplayLine;
use crate::state::measure::TextMeasurer;
use tracing::debug;

/// Ordered log of wrapped display lines, oldest first.
///
/// The buffer only ever grows: there is no eviction and no mutation of a
/// committed line.
#[derive(Debug, Clone, Default)]
pub struct LineWrapBuffer {
    lines: Vec<DisplayLine>,
    budget: i32,
}

impl LineWrapBuffer {
    /// Create an empty buffer wrapping to `log_width - margin` pixels.
    pub fn new(log_width: i32, margin: i32) -> Self {
        Self {
            lines: Vec::new(),
            budget: log_width.saturating_sub(margin).max(0),
        }
    }

    /// Pixel width a line must stay under.
    pub fn budget(&self) -> i32 {
        self.budget
    }

    /// Reflow `message` and append the resulting lines.
    ///
    /// Returns the number of display lines produced (always at least one).
    pub fn append<M>(&mut self, message: &str, measurer: &M) -> usize
    where
        M: TextMeasurer + ?Sized,
    {
        let wrapped = reflow(message, self.budget, measurer);
        let produced = wrapped.len();
        self.lines.extend(wrapped);
        debug!(
            produced,
            total = self.lines.len(),
            "Appended chat message to log"
        );
        produced
    }

    /// Total number of display lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the log holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines, oldest first.
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// The window of at most `rows` lines ending `scroll_index` lines before
    /// the newest one.
    ///
    /// `scroll_index == 0` shows the latest lines.
    pub fn visible_lines(&self, scroll_index: usize, rows: usize) -> &[DisplayLine] {
        let end = self.lines.len().saturating_sub(scroll_index);
        let start = end.saturating_sub(rows);
        &self.lines[start..end]
    }
}

/// Split one logical message into display lines no wider than `budget`.
///
/// A message that already fits is kept verbatim. Otherwise words are packed
/// greedily while `candidate + " " + word` stays strictly under the budget.
/// Words are never split, so a single over-wide word becomes its own
/// overflowing line. The last candidate is always committed.
pub fn reflow<M>(message: &str, budget: i32, measurer: &M) -> Vec<DisplayLine>
where
    M: TextMeasurer + ?Sized,
{
    if measurer.text_width(message) < budget {
        return vec![DisplayLine::new(message)];
    }

    let mut lines = Vec::new();
    let mut candidate = String::new();

    for word in message.split_whitespace() {
        if candidate.is_empty() {
            candidate.push_str(word);
            continue;
        }

        let trial = format!("{candidate} {word}");
        if measurer.text_width(&trial) < budget {
            candidate = trial;
        } else {
            lines.push(DisplayLine::new(std::mem::take(&mut candidate)));
            candidate.push_str(word);
        }
    }

    lines.push(DisplayLine::new(candidate));
    lines
}

#[cfg(test)]
#[path = "line_wrap_tests.rs"]
mod tests;
