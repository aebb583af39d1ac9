//! Scrollbar geometry and the drag-to-scroll controller.
//!
//! # Orientation
//!
//! `scroll_index` counts lines back from the newest one, so `0` shows the
//! latest messages. `thumb_offset` is measured from the top of the track.
//! The two are tied by
//!
//! ```text
//! thumb_offset = round((track_span - thumb_size) * (1 - scroll_index / max_index))
//! ```
//!
//! which puts the thumb at the bottom of the track for the newest content and
//! moves it up as the user scrolls towards older lines.

use tracing::trace;

/// Transient state of one thumb drag gesture.
///
/// Pixel movement accumulates in `pixel_remainder`; the scroll index moves
/// one line each time the remainder crosses a hysteresis fraction of a step.
/// The per-direction flags make sure one crossing issues one step no matter
/// how the movement was split across pointer samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DragAccumulator {
    /// Pointer movement not yet converted into whole steps.
    pub pixel_remainder: f64,
    /// Track-local pointer position of the previous accepted sample.
    pub last_pointer_y: f64,
    /// The previous sample was clamped at the top of the track.
    pub at_top_clamp: bool,
    /// The previous sample was clamped at the bottom of the track.
    pub at_bottom_clamp: bool,
    /// An upward (older) step was issued in the current step cycle.
    pub stepped_up_this_cycle: bool,
    /// A downward (newer) step was issued in the current step cycle.
    pub stepped_down_this_cycle: bool,
}

impl DragAccumulator {
    /// Start accumulating at a (clamped) pointer position.
    pub fn new(pointer_y: f64) -> Self {
        Self {
            pixel_remainder: 0.0,
            last_pointer_y: pointer_y,
            at_top_clamp: false,
            at_bottom_clamp: false,
            stepped_up_this_cycle: false,
            stepped_down_this_cycle: false,
        }
    }

    /// Record a pointer sample already clamped to the track.
    ///
    /// Returns the movement since the previous sample, or `None` when the
    /// sample is dropped because the pointer is still held past the same
    /// boundary it was clamped to last time.
    pub fn sample(&mut self, clamped_y: f64, at_top: bool, at_bottom: bool) -> Option<f64> {
        if (at_top && self.at_top_clamp) || (at_bottom && self.at_bottom_clamp) {
            return None;
        }
        self.at_top_clamp = at_top;
        self.at_bottom_clamp = at_bottom;

        let dy = clamped_y - self.last_pointer_y;
        self.last_pointer_y = clamped_y;
        Some(dy)
    }

    /// Add `dy` pixels and return the resulting scroll index delta.
    ///
    /// Positive results move towards older lines (the thumb went up).
    /// Every whole `step_pixels` of accumulated movement is consumed in the
    /// loop; the trailing check covers the final partial step.
    pub fn accumulate(&mut self, dy: f64, step_pixels: f64, hysteresis: f64) -> i64 {
        if step_pixels <= 0.0 {
            return 0;
        }

        self.pixel_remainder += dy;
        let threshold = step_pixels * hysteresis;
        let mut delta = 0;

        while self.pixel_remainder.abs() >= step_pixels {
            delta += self.half_step_check(threshold);
            if self.pixel_remainder > 0.0 {
                self.pixel_remainder -= step_pixels;
            } else {
                self.pixel_remainder += step_pixels;
            }
            self.stepped_up_this_cycle = false;
            self.stepped_down_this_cycle = false;
        }

        delta + self.half_step_check(threshold)
    }

    fn half_step_check(&mut self, threshold: f64) -> i64 {
        if self.pixel_remainder.abs() < threshold {
            return 0;
        }

        if self.pixel_remainder < 0.0 {
            if !self.stepped_up_this_cycle {
                self.stepped_up_this_cycle = true;
                return 1;
            }
        } else if !self.stepped_down_this_cycle {
            self.stepped_down_this_cycle = true;
            return -1;
        }
        0
    }
}

/// Scrollbar model for the chat log.
///
/// Owns the scroll position in both of its representations (line index and
/// thumb pixel offset) and keeps them consistent, except during a drag where
/// the thumb follows the pointer smoothly and is re-synced on release.
#[derive(Debug, Clone)]
pub struct ScrollModel {
    track_span: i32,
    min_thumb_size: i32,
    drag_hysteresis: f64,
    total_lines: usize,
    visible_rows: usize,
    scroll_index: usize,
    thumb_size: i32,
    thumb_offset: i32,
    step_pixels: f64,
    thumb_exact: f64,
    drag: Option<DragAccumulator>,
}

impl ScrollModel {
    /// Create a model for an empty log.
    ///
    /// # Arguments
    /// * `track_span` - Track length in pixels (between the arrow buttons)
    /// * `min_thumb_size` - Smallest thumb the track will draw
    /// * `drag_hysteresis` - Fraction of a step a drag must cover to step
    pub fn new(track_span: i32, min_thumb_size: i32, drag_hysteresis: f64) -> Self {
        let track_span = track_span.max(0);
        let mut model = Self {
            track_span,
            min_thumb_size: min_thumb_size.max(1),
            drag_hysteresis,
            total_lines: 0,
            visible_rows: 0,
            scroll_index: 0,
            thumb_size: track_span,
            thumb_offset: 0,
            step_pixels: 0.0,
            thumb_exact: 0.0,
            drag: None,
        };
        model.resize(0, 0);
        model
    }

    /// Recompute thumb geometry for new content or viewport dimensions.
    ///
    /// The current scroll index is kept, clamped to the new range.
    pub fn resize(&mut self, total_lines: usize, visible_rows: usize) {
        self.total_lines = total_lines;
        self.visible_rows = visible_rows;

        if visible_rows == 0 || total_lines <= visible_rows {
            self.thumb_size = self.track_span;
            self.step_pixels = 0.0;
            self.scroll_index = 0;
            self.thumb_offset = 0;
        } else {
            let proportional =
                (visible_rows as f64 / total_lines as f64 * self.track_span as f64).round() as i32;
            self.thumb_size = proportional.max(self.min_thumb_size).min(self.track_span);
            let max_index = self.max_scroll_index();
            self.scroll_index = self.scroll_index.min(max_index);
            self.step_pixels = f64::from(self.free_span()) / max_index as f64;
            self.thumb_offset = self.offset_for_index(self.scroll_index);
        }
        self.thumb_exact = f64::from(self.thumb_offset);
    }

    /// Move one line in the sign of `delta` (`+` = older). Zero is a no-op.
    ///
    /// Returns whether the scroll index changed.
    pub fn step_by(&mut self, delta: i32) -> bool {
        match delta.signum() {
            1 => self.move_by(1),
            -1 => self.move_by(-1),
            _ => false,
        }
    }

    /// Move one page, keeping one line of context (`+` = older).
    ///
    /// A page is `visible_rows - 1` lines, so a single-row window does not
    /// page at all.
    pub fn page(&mut self, direction: i32) -> bool {
        let amount = self.visible_rows.saturating_sub(1) as i64;
        match direction.signum() {
            1 => self.move_by(amount),
            -1 => self.move_by(-amount),
            _ => false,
        }
    }

    /// Jump to the newest line.
    pub fn snap_to_latest(&mut self) -> bool {
        let changed = self.scroll_index != 0;
        self.scroll_index = 0;
        self.sync_thumb();
        changed
    }

    /// Start a thumb drag at a track-local pointer position.
    pub fn begin_drag(&mut self, pointer_y: f64) {
        let clamped = pointer_y.clamp(0.0, f64::from(self.track_span));
        self.drag = Some(DragAccumulator::new(clamped));
        self.thumb_exact = f64::from(self.thumb_offset);
    }

    /// Feed a track-local pointer position while dragging.
    ///
    /// Returns whether the scroll index changed. Samples outside a drag are
    /// ignored.
    pub fn drag_to(&mut self, pointer_y: f64) -> bool {
        let span = f64::from(self.track_span);
        let free = f64::from(self.free_span());
        let step_pixels = self.step_pixels;
        let hysteresis = self.drag_hysteresis;
        let max_index = self.max_scroll_index() as i64;

        let Some(acc) = self.drag.as_mut() else {
            return false;
        };

        let at_top = pointer_y < 0.0;
        let at_bottom = pointer_y > span;
        let Some(dy) = acc.sample(pointer_y.clamp(0.0, span), at_top, at_bottom) else {
            return false;
        };

        if step_pixels > 0.0 {
            self.thumb_exact = (self.thumb_exact + dy).clamp(0.0, free);
            self.thumb_offset = self.thumb_exact.round() as i32;
        }

        let delta = acc.accumulate(dy, step_pixels, hysteresis);
        if delta == 0 {
            return false;
        }

        let previous = self.scroll_index;
        self.scroll_index = (previous as i64 + delta).clamp(0, max_index) as usize;
        trace!(
            delta,
            from = previous,
            to = self.scroll_index,
            "Drag crossed step boundary"
        );
        self.scroll_index != previous
    }

    /// Finish the drag and snap the thumb back onto the scroll index.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.sync_thumb();
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag accumulator, if any.
    pub fn drag_state(&self) -> Option<&DragAccumulator> {
        self.drag.as_ref()
    }

    /// Lines scrolled back from the newest one.
    pub fn scroll_index(&self) -> usize {
        self.scroll_index
    }

    /// Thumb length in pixels.
    pub fn thumb_size(&self) -> i32 {
        self.thumb_size
    }

    /// Thumb distance from the top of the track in pixels.
    pub fn thumb_offset(&self) -> i32 {
        self.thumb_offset
    }

    /// Track length in pixels.
    pub fn track_span(&self) -> i32 {
        self.track_span
    }

    /// Pixels of thumb travel per line; zero when nothing can scroll.
    pub fn step_pixels(&self) -> f64 {
        self.step_pixels
    }

    /// Total lines last passed to [`resize`](Self::resize).
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Visible rows last passed to [`resize`](Self::resize).
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Largest valid scroll index.
    pub fn max_scroll_index(&self) -> usize {
        if self.visible_rows == 0 {
            0
        } else {
            self.total_lines.saturating_sub(self.visible_rows)
        }
    }

    /// Thumb offset corresponding to `scroll_index`.
    pub fn offset_for_index(&self, scroll_index: usize) -> i32 {
        let max_index = self.max_scroll_index();
        if max_index == 0 {
            return 0;
        }
        let fraction = 1.0 - scroll_index.min(max_index) as f64 / max_index as f64;
        (f64::from(self.free_span()) * fraction).round() as i32
    }

    /// Scroll index corresponding to a thumb offset (inverse mapping).
    pub fn scroll_index_for_offset(&self, thumb_offset: i32) -> usize {
        let max_index = self.max_scroll_index();
        let free = self.free_span();
        if max_index == 0 || free <= 0 {
            return 0;
        }
        let offset = thumb_offset.clamp(0, free);
        let fraction = 1.0 - f64::from(offset) / f64::from(free);
        ((max_index as f64 * fraction).round() as usize).min(max_index)
    }

    fn free_span(&self) -> i32 {
        (self.track_span - self.thumb_size).max(0)
    }

    fn move_by(&mut self, amount: i64) -> bool {
        let max_index = self.max_scroll_index() as i64;
        let next = (self.scroll_index as i64 + amount).clamp(0, max_index) as usize;
        if next == self.scroll_index {
            return false;
        }
        self.scroll_index = next;
        self.sync_thumb();
        true
    }

    fn sync_thumb(&mut self) {
        self.thumb_offset = self.offset_for_index(self.scroll_index);
        self.thumb_exact = f64::from(self.thumb_offset);
    }
}

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;
