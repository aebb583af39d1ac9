//! The chat overlay widget.
//!
//! [`ChatWidget`] owns one of each core component and routes host events
//! into them. Hosts deliver events through the `on_*` handlers and read
//! geometry back through accessors; they never mutate the parts directly.

use crate::config::WidgetConfig;
use crate::model::{ChatKey, DisplayLine, Point, PxRect, Size};
use crate::session::SessionSink;
use crate::state::history::CommandHistory;
use crate::state::input_line::InputLineView;
use crate::state::line_wrap::LineWrapBuffer;
use crate::state::measure::TextMeasurer;
use crate::state::region::{RegionDispatcher, WidgetAction, WidgetLayout};
use crate::state::scroll::ScrollModel;
use crate::state::slide::{SlideAnimator, SlidePhase};
use tracing::debug;

/// Capabilities the host surface lends to the widget for one event.
pub trait ChatHost: TextMeasurer {
    /// Ask the host to repaint the widget on the next frame.
    fn request_redraw(&mut self);
}

/// Collapsible chat log with scrollbar and input line.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    config: WidgetConfig,
    dispatcher: RegionDispatcher,
    log: LineWrapBuffer,
    scroll: ScrollModel,
    slide: SlideAnimator,
    input: InputLineView,
    history: CommandHistory,
    input_focused: bool,
    hovering: bool,
}

impl ChatWidget {
    /// Create a hidden widget with an empty log.
    pub fn new(config: WidgetConfig) -> Self {
        let layout = WidgetLayout::from_config(&config.layout);
        Self {
            dispatcher: RegionDispatcher::new(layout),
            log: LineWrapBuffer::new(layout.log_area.width, config.wrap_margin),
            scroll: ScrollModel::new(
                layout.track.height,
                config.min_thumb_size,
                config.drag_hysteresis,
            ),
            slide: SlideAnimator::from_config(&config),
            input: InputLineView::new(config.input_budget),
            history: CommandHistory::new(config.history_capacity),
            input_focused: false,
            hovering: false,
            config,
        }
    }

    /// Append an inbound chat message and jump to the newest line.
    pub fn on_chat_message_received<H: ChatHost + ?Sized>(&mut self, text: &str, host: &mut H) {
        self.log.append(text, &*host);
        self.scroll.snap_to_latest();
        self.relayout(&*host);
        host.request_redraw();
    }

    /// Recompute how many log rows fit for the host's line height.
    pub fn relayout<M: TextMeasurer + ?Sized>(&mut self, measurer: &M) {
        let rows = self.layout().visible_rows(measurer.line_height());
        self.scroll.resize(self.log.len(), rows);
    }

    /// Handle a pointer press.
    ///
    /// Returns the action that was applied, or `None` when the press missed
    /// every region or the overlay is mid-slide.
    pub fn on_pointer_down<H: ChatHost + ?Sized>(
        &mut self,
        point: Point,
        viewport: Size,
        host: &mut H,
    ) -> Option<WidgetAction> {
        let action = self
            .dispatcher
            .hit_test(point, viewport, &self.slide, &self.scroll)?;

        match action {
            WidgetAction::Toggle => self.apply_toggle(),
            WidgetAction::StepBy(delta) => {
                self.scroll.step_by(delta);
            }
            WidgetAction::Page(direction) => {
                self.scroll.page(direction);
            }
            WidgetAction::BeginDrag { track_y } => self.scroll.begin_drag(track_y),
            WidgetAction::FocusInput => self.input_focused = true,
        }
        debug!(?action, "Pointer press dispatched");

        self.slide.note_interaction();
        host.request_redraw();
        Some(action)
    }

    /// Handle pointer movement with a button held.
    ///
    /// Only has an effect while a thumb drag is in progress.
    pub fn on_pointer_drag<H: ChatHost + ?Sized>(
        &mut self,
        point: Point,
        viewport: Size,
        host: &mut H,
    ) {
        if !self.scroll.is_dragging() {
            return;
        }

        let layout = self.layout();
        let track_top = layout.origin(viewport, self.slide.offset()).y + layout.track.y;
        let thumb_before = self.scroll.thumb_offset();
        let stepped = self.scroll.drag_to(f64::from(point.y - track_top));

        self.slide.note_interaction();
        if stepped || self.scroll.thumb_offset() != thumb_before {
            host.request_redraw();
        }
    }

    /// Handle a pointer release.
    pub fn on_pointer_up<H: ChatHost + ?Sized>(&mut self, host: &mut H) {
        if self.scroll.is_dragging() {
            self.scroll.end_drag();
            host.request_redraw();
        }
    }

    /// Track hover to keep a visible overlay open under the pointer.
    ///
    /// The last hover state is remembered and re-applied once a slide up
    /// finishes, so a pointer already resting on the overlay holds it open.
    pub fn on_pointer_move(&mut self, point: Point, viewport: Size) {
        self.hovering = self.widget_rect(viewport).contains(point);
        self.slide.set_hovering(self.hovering);
    }

    /// Scroll by wheel notches; positive `delta` scrolls towards older lines.
    ///
    /// Each call moves at most one line regardless of magnitude. Ignored
    /// unless the overlay is fully visible.
    pub fn on_scroll_wheel<H: ChatHost + ?Sized>(&mut self, delta: i32, host: &mut H) {
        if !self.slide.is_visible() {
            return;
        }
        self.slide.note_interaction();
        if self.scroll.step_by(delta) {
            host.request_redraw();
        }
    }

    /// Handle a key while the input line has focus.
    ///
    /// Returns `false` without doing anything when the input is not focused,
    /// so the host can apply its own bindings instead.
    pub fn on_key<H, S>(&mut self, key: ChatKey, host: &mut H, session: &mut S) -> bool
    where
        H: ChatHost + ?Sized,
        S: SessionSink + ?Sized,
    {
        if !self.input_focused {
            return false;
        }

        match key {
            ChatKey::Char(ch) => {
                self.history.reset_cursor();
                self.input.append(ch, &*host);
            }
            ChatKey::Backspace => {
                self.history.reset_cursor();
                self.input.backspace(&*host);
            }
            ChatKey::Enter => {
                let text = self.input.submit(&mut self.history);
                if !text.is_empty() {
                    session.send_chat(&text);
                }
            }
            ChatKey::HistoryPrev => {
                if let Some(entry) = self.history.previous().map(str::to_owned) {
                    self.input.set_text(entry, &*host);
                }
            }
            ChatKey::HistoryNext => {
                if self.history.is_browsing() {
                    match self.history.next_entry().map(str::to_owned) {
                        Some(entry) => self.input.set_text(entry, &*host),
                        None => self.input.clear(),
                    }
                }
            }
            ChatKey::Escape => self.input_focused = false,
        }

        self.slide.note_interaction();
        host.request_redraw();
        true
    }

    /// Advance the slide animation by one tick and feed idle time.
    pub fn on_frame_tick<H: ChatHost + ?Sized>(&mut self, delta_ms: u64, host: &mut H) {
        let moved = self.slide.advance(1);
        if moved && self.slide.is_visible() {
            self.slide.set_hovering(self.hovering);
        }
        let auto_hidden = self.slide.note_idle(delta_ms, true);
        if auto_hidden {
            self.input_focused = false;
        }
        if moved || auto_hidden {
            host.request_redraw();
        }
    }

    /// Toggle the overlay from a host key binding.
    pub fn toggle<H: ChatHost + ?Sized>(&mut self, host: &mut H) {
        self.apply_toggle();
        host.request_redraw();
    }

    /// Scroll one line from a host key binding (`+` = older).
    pub fn step_by<H: ChatHost + ?Sized>(&mut self, delta: i32, host: &mut H) {
        self.slide.note_interaction();
        if self.scroll.step_by(delta) {
            host.request_redraw();
        }
    }

    /// Scroll one page from a host key binding (`+` = older).
    pub fn page<H: ChatHost + ?Sized>(&mut self, direction: i32, host: &mut H) {
        self.slide.note_interaction();
        if self.scroll.page(direction) {
            host.request_redraw();
        }
    }

    /// Give keyboard focus to the input line.
    ///
    /// A hidden or closing overlay is slid open first.
    pub fn focus_input<H: ChatHost + ?Sized>(&mut self, host: &mut H) {
        if self.slide.is_hidden() || self.slide.phase() == SlidePhase::SlidingDown {
            self.slide.toggle();
        }
        self.input_focused = true;
        self.slide.note_interaction();
        host.request_redraw();
    }

    /// Whether keystrokes go to the input line.
    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    /// Current slide offset in pixels.
    pub fn offset(&self) -> i32 {
        self.slide.offset()
    }

    /// Widget rectangle in viewport coordinates.
    pub fn widget_rect(&self, viewport: Size) -> PxRect {
        self.layout().widget_rect(viewport, self.slide.offset())
    }

    /// Sub-rectangles of the widget.
    pub fn layout(&self) -> &WidgetLayout {
        self.dispatcher.layout()
    }

    /// Log lines in the current scroll window, oldest first.
    pub fn visible_lines(&self) -> &[DisplayLine] {
        self.log
            .visible_lines(self.scroll.scroll_index(), self.scroll.visible_rows())
    }

    /// The wrapped log.
    pub fn log(&self) -> &LineWrapBuffer {
        &self.log
    }

    /// Scrollbar state.
    pub fn scroll(&self) -> &ScrollModel {
        &self.scroll
    }

    /// Slide animation state.
    pub fn slide(&self) -> &SlideAnimator {
        &self.slide
    }

    /// Pending input line.
    pub fn input(&self) -> &InputLineView {
        &self.input
    }

    /// Sent-message history.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Configuration the widget was built with.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn apply_toggle(&mut self) {
        self.slide.toggle();
        if self.slide.phase() == SlidePhase::SlidingDown {
            self.input_focused = false;
        }
    }
}

#[cfg(test)]
#[path = "chat_widget_tests.rs"]
mod tests;
