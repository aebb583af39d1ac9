//! Pending chat message with tail-fit truncation.

use crate::state::history::HistoryStore;
use crate::state::measure::TextMeasurer;

/// Text being typed into the chat input box.
///
/// Only the longest suffix that fits the pixel budget is shown, so the caret
/// end of the message is always visible while typing.
#[derive(Debug, Clone, Default)]
pub struct InputLineView {
    full_text: String,
    /// Byte index of the first visible char. Always a char boundary.
    visible_start: usize,
    budget: i32,
}

impl InputLineView {
    /// Create an empty input line with a pixel budget for the visible part.
    pub fn new(budget: i32) -> Self {
        Self {
            full_text: String::new(),
            visible_start: 0,
            budget: budget.max(0),
        }
    }

    /// Type one character.
    pub fn append<M: TextMeasurer + ?Sized>(&mut self, ch: char, measurer: &M) {
        self.full_text.push(ch);
        self.refit(measurer);
    }

    /// Delete the last character. Returns whether anything was removed.
    pub fn backspace<M: TextMeasurer + ?Sized>(&mut self, measurer: &M) -> bool {
        let removed = self.full_text.pop().is_some();
        if removed {
            self.refit(measurer);
        }
        removed
    }

    /// Replace the whole text, e.g. with a recalled history entry.
    pub fn set_text<M: TextMeasurer + ?Sized>(&mut self, text: impl Into<String>, measurer: &M) {
        self.full_text = text.into();
        self.refit(measurer);
    }

    /// Take the pending text and reset to empty.
    ///
    /// Non-empty text is also recorded in `history`.
    pub fn submit<H: HistoryStore + ?Sized>(&mut self, history: &mut H) -> String {
        let text = std::mem::take(&mut self.full_text);
        self.visible_start = 0;
        if !text.is_empty() {
            history.push(text.clone());
        }
        text
    }

    /// Discard the pending text.
    pub fn clear(&mut self) {
        self.full_text.clear();
        self.visible_start = 0;
    }

    /// The whole pending text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The suffix of the pending text that fits the budget.
    pub fn visible_text(&self) -> &str {
        &self.full_text[self.visible_start..]
    }

    /// Byte index where the visible suffix starts.
    pub fn visible_start(&self) -> usize {
        self.visible_start
    }

    /// Pixel budget of the visible suffix.
    pub fn budget(&self) -> i32 {
        self.budget
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    fn refit<M: TextMeasurer + ?Sized>(&mut self, measurer: &M) {
        self.visible_start = self
            .full_text
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| measurer.text_width(&self.full_text[i..]) <= self.budget)
            .unwrap_or(self.full_text.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::measure::MonospaceMeasurer;

    fn unit() -> MonospaceMeasurer {
        MonospaceMeasurer::new(1, 1)
    }

    #[test]
    fn typing_past_budget_keeps_the_tail_visible() {
        let m = unit();
        let mut input = InputLineView::new(5);
        for ch in "HELLOWORLD".chars() {
            input.append(ch, &m);
        }
        assert_eq!(input.full_text(), "HELLOWORLD");
        assert_eq!(input.visible_text(), "WORLD");
        assert_eq!(input.visible_start(), 5);
    }

    #[test]
    fn short_text_is_fully_visible() {
        let m = unit();
        let mut input = InputLineView::new(5);
        input.set_text("hey", &m);
        assert_eq!(input.visible_text(), "hey");
        assert_eq!(input.visible_start(), 0);
    }

    #[test]
    fn backspace_reveals_earlier_characters() {
        let m = unit();
        let mut input = InputLineView::new(5);
        input.set_text("HELLOWORLD", &m);
        assert!(input.backspace(&m));
        assert_eq!(input.visible_text(), "OWORL");

        let mut empty = InputLineView::new(5);
        assert!(!empty.backspace(&m));
    }

    #[test]
    fn visible_start_stays_on_char_boundary() {
        let m = unit();
        let mut input = InputLineView::new(4);
        input.set_text("héllo wörld", &m);
        assert_eq!(input.visible_text(), "örld");
        assert!(input.full_text().is_char_boundary(input.visible_start()));
    }

    #[test]
    fn wide_characters_count_double() {
        let m = unit();
        let mut input = InputLineView::new(3);
        input.set_text("ab漢字", &m);
        assert_eq!(input.visible_text(), "字");
    }

    #[test]
    fn char_wider_than_budget_shows_nothing() {
        let m = unit();
        let mut input = InputLineView::new(1);
        input.set_text("漢", &m);
        assert_eq!(input.visible_text(), "");
        assert_eq!(input.full_text(), "漢");
    }

    #[test]
    fn submit_returns_text_and_records_history() {
        let m = unit();
        let mut history: Vec<String> = Vec::new();
        let mut input = InputLineView::new(5);
        input.set_text("HELLOWORLD", &m);

        assert_eq!(input.submit(&mut history), "HELLOWORLD");
        assert!(input.is_empty());
        assert_eq!(input.visible_text(), "");
        assert_eq!(history, vec!["HELLOWORLD".to_string()]);
    }

    #[test]
    fn submitting_empty_text_skips_history() {
        let mut history: Vec<String> = Vec::new();
        let mut input = InputLineView::new(5);
        assert_eq!(input.submit(&mut history), "");
        assert!(history.is_empty());
    }

    #[test]
    fn clear_discards_pending_text() {
        let m = unit();
        let mut input = InputLineView::new(5);
        input.set_text("draft", &m);
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.visible_start(), 0);
    }
}
