//! Reveal/hide animation state machine with idle auto-hide.
//!
//! `offset` is how far the overlay is pushed below its resting position:
//! `0` is fully visible, `max_offset` fully hidden (only the header strip
//! remains on screen).

use crate::config::WidgetConfig;
use tracing::{debug, info};

/// Animation phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    /// Resting at either end of the travel.
    #[default]
    Idle,
    /// Moving towards fully visible.
    SlidingUp,
    /// Moving towards fully hidden.
    SlidingDown,
}

/// Slide animator for the chat overlay.
///
/// # Invariants
/// - `offset` stays within `[0, max_offset]`
/// - `Idle` only occurs at `offset == 0` or `offset == max_offset`
/// - repeated [`advance`](Self::advance) reaches `Idle` within
///   `ceil(max_offset / speed)` ticks
#[derive(Debug, Clone)]
pub struct SlideAnimator {
    offset: i32,
    max_offset: i32,
    speed: i32,
    phase: SlidePhase,
    locked_open: bool,
    idle_accum_ms: u64,
    idle_timeout_ms: u64,
    auto_hide_enabled: bool,
}

impl SlideAnimator {
    /// Create a hidden animator.
    pub fn new(speed: i32, max_offset: i32, idle_timeout_ms: u64, auto_hide_enabled: bool) -> Self {
        let max_offset = max_offset.max(0);
        Self {
            offset: max_offset,
            max_offset,
            speed: speed.max(1),
            phase: SlidePhase::Idle,
            locked_open: false,
            idle_accum_ms: 0,
            idle_timeout_ms,
            auto_hide_enabled,
        }
    }

    /// Create a hidden animator from widget configuration.
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(
            config.slide_speed,
            config.max_offset,
            config.idle_timeout_ms,
            config.auto_hide_enabled,
        )
    }

    /// Reverse or start the slide.
    ///
    /// Hidden or sliding down starts sliding up; visible or sliding up
    /// starts sliding down. A toggle mid-slide reverses from the current
    /// offset.
    pub fn toggle(&mut self) {
        let heading_up = match self.phase {
            SlidePhase::SlidingUp => false,
            SlidePhase::SlidingDown => true,
            SlidePhase::Idle => self.offset != 0,
        };

        if heading_up {
            self.phase = SlidePhase::SlidingUp;
        } else {
            self.phase = SlidePhase::SlidingDown;
            self.locked_open = false;
        }
        self.idle_accum_ms = 0;
        debug!(phase = ?self.phase, offset = self.offset, "Chat overlay toggled");
    }

    /// Advance the animation by `ticks` frames.
    ///
    /// Returns whether the offset changed.
    pub fn advance(&mut self, ticks: u32) -> bool {
        let distance = self
            .speed
            .saturating_mul(i32::try_from(ticks).unwrap_or(i32::MAX));
        let before = self.offset;

        match self.phase {
            SlidePhase::Idle => return false,
            SlidePhase::SlidingUp => {
                self.offset = self.offset.saturating_sub(distance).max(0);
                if self.offset == 0 {
                    self.phase = SlidePhase::Idle;
                }
            }
            SlidePhase::SlidingDown => {
                self.offset = self.offset.saturating_add(distance).min(self.max_offset);
                if self.offset == self.max_offset {
                    self.phase = SlidePhase::Idle;
                }
            }
        }

        self.offset != before
    }

    /// Feed idle time.
    ///
    /// With `additive` the elapsed time is added to the idle counter (unless
    /// the overlay is locked open); otherwise the counter is set to
    /// `elapsed_ms`. Once the counter exceeds the idle timeout while the
    /// overlay rests fully visible, it toggles towards hidden.
    ///
    /// Returns whether an auto-hide was triggered.
    pub fn note_idle(&mut self, elapsed_ms: u64, additive: bool) -> bool {
        if additive {
            if !self.locked_open {
                self.idle_accum_ms = self.idle_accum_ms.saturating_add(elapsed_ms);
            }
        } else {
            self.idle_accum_ms = elapsed_ms;
        }

        let should_hide = self.auto_hide_enabled
            && !self.locked_open
            && self.is_visible()
            && self.idle_accum_ms > self.idle_timeout_ms;
        if should_hide {
            info!(
                idle_ms = self.idle_accum_ms,
                "Auto-hiding chat overlay after idle timeout"
            );
            self.toggle();
        }
        should_hide
    }

    /// Reset the idle counter after user activity.
    pub fn note_interaction(&mut self) {
        self.note_idle(0, false);
    }

    /// Track whether the pointer is over the overlay.
    ///
    /// Only a fully visible overlay reacts: hovering locks it open,
    /// leaving unlocks it. Hovering never opens a hidden overlay.
    pub fn set_hovering(&mut self, is_over: bool) {
        if self.is_visible() {
            self.locked_open = is_over;
        }
    }

    /// Current offset in pixels below the resting position.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Offset of the fully hidden overlay.
    pub fn max_offset(&self) -> i32 {
        self.max_offset
    }

    /// Pixels moved per tick.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Current phase.
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// Whether an animation is running.
    pub fn is_sliding(&self) -> bool {
        self.phase != SlidePhase::Idle
    }

    /// Resting fully visible.
    pub fn is_visible(&self) -> bool {
        self.phase == SlidePhase::Idle && self.offset == 0
    }

    /// Resting fully hidden.
    pub fn is_hidden(&self) -> bool {
        self.phase == SlidePhase::Idle && self.offset == self.max_offset
    }

    /// Whether idle auto-hide is suppressed by hovering.
    pub fn is_locked_open(&self) -> bool {
        self.locked_open
    }

    /// Accumulated idle time.
    pub fn idle_ms(&self) -> u64 {
        self.idle_accum_ms
    }

    /// Upper bound on ticks any slide needs to come to rest.
    pub fn ticks_to_rest(&self) -> u32 {
        let ticks = (self.max_offset + self.speed - 1) / self.speed;
        u32::try_from(ticks).unwrap_or(0)
    }
}
