//! Widget geometry and pointer hit-testing.

use crate::config::LayoutConfig;
use crate::model::{Point, PxRect, Size};
use crate::state::scroll::ScrollModel;
use crate::state::slide::SlideAnimator;

/// Fixed sub-rectangles of the widget, relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    /// Whole widget extent.
    pub size: Size,
    /// Toggle button at the left of the header strip.
    pub toggle: PxRect,
    /// Area the log lines are drawn into.
    pub log_area: PxRect,
    /// Arrow button scrolling towards older lines.
    pub scroll_up: PxRect,
    /// Scrollbar track between the arrow buttons.
    pub track: PxRect,
    /// Arrow button scrolling towards newer lines.
    pub scroll_down: PxRect,
    /// Input box along the bottom edge.
    pub input_box: PxRect,
}

impl WidgetLayout {
    /// Derive the sub-rectangles from layout dimensions.
    pub fn from_config(config: &LayoutConfig) -> Self {
        let log_height = config.log_height();
        let bar_x = config.width - config.scrollbar_width;
        let log_top = config.header_height;

        Self {
            size: Size::new(config.width, config.height),
            toggle: PxRect::new(0, 0, config.toggle_width, config.header_height),
            log_area: PxRect::new(0, log_top, bar_x, log_height),
            scroll_up: PxRect::new(bar_x, log_top, config.scrollbar_width, config.button_height),
            track: PxRect::new(
                bar_x,
                log_top + config.button_height,
                config.scrollbar_width,
                config.track_span(),
            ),
            scroll_down: PxRect::new(
                bar_x,
                log_top + log_height - config.button_height,
                config.scrollbar_width,
                config.button_height,
            ),
            input_box: PxRect::new(
                0,
                config.height - config.input_height,
                config.width,
                config.input_height,
            ),
        }
    }

    /// Top-left corner of the widget in viewport coordinates.
    ///
    /// The widget is anchored to the bottom-left of the viewport and pushed
    /// down by the slide offset.
    pub fn origin(&self, viewport: Size, offset: i32) -> Point {
        Point::new(0, viewport.height - self.size.height + offset)
    }

    /// The widget rectangle in viewport coordinates.
    pub fn widget_rect(&self, viewport: Size, offset: i32) -> PxRect {
        let origin = self.origin(viewport, offset);
        PxRect::new(origin.x, origin.y, self.size.width, self.size.height)
    }

    /// Number of whole log lines that fit in the log area.
    pub fn visible_rows(&self, line_height: i32) -> usize {
        if line_height <= 0 {
            return 0;
        }
        usize::try_from(self.log_area.height / line_height).unwrap_or(0)
    }
}

/// Interactive regions, in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Header toggle button.
    Toggle,
    /// Scroll-up arrow.
    ScrollUp,
    /// Track between the up arrow and the thumb.
    TrackAboveThumb,
    /// Scrollbar thumb.
    Thumb,
    /// Track between the thumb and the down arrow.
    TrackBelowThumb,
    /// Scroll-down arrow.
    ScrollDown,
    /// Message input box.
    InputBox,
}

/// What a pointer press on the widget asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetAction {
    /// Slide the overlay up or down.
    Toggle,
    /// Scroll one line; `+1` is older, `-1` newer.
    StepBy(i32),
    /// Scroll one page; `+1` is older, `-1` newer.
    Page(i32),
    /// Start dragging the thumb at a track-local y.
    BeginDrag {
        /// Pointer y relative to the top of the track.
        track_y: f64,
    },
    /// Give keyboard focus to the input box.
    FocusInput,
}

/// Maps pointer positions to widget actions.
#[derive(Debug, Clone)]
pub struct RegionDispatcher {
    layout: WidgetLayout,
}

impl RegionDispatcher {
    /// Create a dispatcher for a fixed layout.
    pub fn new(layout: WidgetLayout) -> Self {
        Self { layout }
    }

    /// The layout being hit-tested.
    pub fn layout(&self) -> &WidgetLayout {
        &self.layout
    }

    /// Widget-local rectangles of every region, in priority order.
    pub fn regions(&self, thumb_offset: i32, thumb_size: i32) -> [(Region, PxRect); 7] {
        let track = self.layout.track;
        let thumb_top = track.y + thumb_offset;
        let thumb_bottom = thumb_top + thumb_size;

        [
            (Region::Toggle, self.layout.toggle),
            (Region::ScrollUp, self.layout.scroll_up),
            (
                Region::TrackAboveThumb,
                PxRect::new(track.x, track.y, track.width, thumb_offset),
            ),
            (
                Region::Thumb,
                PxRect::new(track.x, thumb_top, track.width, thumb_size),
            ),
            (
                Region::TrackBelowThumb,
                PxRect::new(track.x, thumb_bottom, track.width, track.bottom() - thumb_bottom),
            ),
            (Region::ScrollDown, self.layout.scroll_down),
            (Region::InputBox, self.layout.input_box),
        ]
    }

    /// First region containing `point`, ignoring animation state.
    pub fn region_at(
        &self,
        point: Point,
        viewport: Size,
        offset: i32,
        thumb_offset: i32,
        thumb_size: i32,
    ) -> Option<Region> {
        let origin = self.layout.origin(viewport, offset);
        let local = Point::new(point.x - origin.x, point.y - origin.y);

        self.regions(thumb_offset, thumb_size)
            .into_iter()
            .find(|(_, rect)| rect.contains(local))
            .map(|(region, _)| region)
    }

    /// Resolve a pointer press into an action.
    ///
    /// Returns `None` while the overlay is sliding and for presses outside
    /// every interactive region.
    pub fn hit_test(
        &self,
        point: Point,
        viewport: Size,
        slide: &SlideAnimator,
        scroll: &ScrollModel,
    ) -> Option<WidgetAction> {
        if slide.is_sliding() {
            return None;
        }

        let offset = slide.offset();
        let region = self.region_at(
            point,
            viewport,
            offset,
            scroll.thumb_offset(),
            scroll.thumb_size(),
        )?;

        let action = match region {
            Region::Toggle => WidgetAction::Toggle,
            Region::ScrollUp => WidgetAction::StepBy(1),
            Region::TrackAboveThumb => WidgetAction::Page(1),
            Region::Thumb => {
                let track_top = self.layout.origin(viewport, offset).y + self.layout.track.y;
                WidgetAction::BeginDrag {
                    track_y: f64::from(point.y - track_top),
                }
            }
            Region::TrackBelowThumb => WidgetAction::Page(-1),
            Region::ScrollDown => WidgetAction::StepBy(-1),
            Region::InputBox => WidgetAction::FocusInput,
        };
        Some(action)
    }
}

#[cfg(test)]
#[path = "region_tests.rs"]
mod tests;
