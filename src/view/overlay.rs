//! Chat overlay rendering.
//!
//! Draws a [`ChatWidget`] into a ratatui buffer by mapping its pixel layout
//! onto terminal cells. Nothing here mutates the widget.

use super::cells::CellGeometry;
use crate::model::PxRect;
use crate::state::{ChatWidget, SlidePhase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Clear, Widget},
};

const HEADER_STYLE: Style = Style::new().bg(Color::DarkGray);
const TOGGLE_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
const LOG_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);
const TRACK_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);
const THUMB_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);
const ARROW_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);
const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const INPUT_FOCUSED_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::Blue);

/// Renderable view of a [`ChatWidget`] for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ChatOverlay<'a> {
    widget: &'a ChatWidget,
    cells: CellGeometry,
}

impl<'a> ChatOverlay<'a> {
    /// Wrap a widget for rendering with the given cell geometry.
    pub fn new(widget: &'a ChatWidget, cells: CellGeometry) -> Self {
        Self { widget, cells }
    }

    fn toggle_label(&self) -> &'static str {
        match self.widget.slide().phase() {
            SlidePhase::SlidingUp => "v chat",
            SlidePhase::SlidingDown => "^ chat",
            SlidePhase::Idle if self.widget.slide().is_visible() => "v chat",
            SlidePhase::Idle => "^ chat",
        }
    }

    fn render_log(&self, log: Rect, first_row_px: i32, area: Rect, buf: &mut Buffer) {
        let line_height = self.cells.cell_height();
        let mut y = first_row_px;
        for line in self.widget.visible_lines() {
            if let Some(row) = self.cells.row_of(y, area) {
                if row >= log.y && row < log.bottom() {
                    buf.set_stringn(log.x, row, line.as_str(), usize::from(log.width), LOG_STYLE);
                }
            }
            y = y.saturating_add(line_height);
        }
    }

    fn render_scrollbar(&self, place: &impl Fn(PxRect) -> Option<Rect>, buf: &mut Buffer) {
        let layout = self.widget.layout();
        let scroll = self.widget.scroll();

        if let Some(track) = place(layout.track) {
            fill(buf, track, "│", TRACK_STYLE);
        }

        let track = layout.track;
        let thumb = PxRect::new(
            track.x,
            track.y + scroll.thumb_offset(),
            track.width,
            scroll.thumb_size(),
        );
        if let Some(thumb) = place(thumb) {
            fill(buf, thumb, "█", THUMB_STYLE);
        }

        if let Some(up) = place(layout.scroll_up) {
            buf.set_style(up, ARROW_STYLE);
            buf.set_stringn(up.x, up.y, "▲", usize::from(up.width), ARROW_STYLE);
        }
        if let Some(down) = place(layout.scroll_down) {
            buf.set_style(down, ARROW_STYLE);
            buf.set_stringn(down.x, down.y, "▼", usize::from(down.width), ARROW_STYLE);
        }
    }

    fn render_input(&self, input: Rect, buf: &mut Buffer) {
        let focused = self.widget.is_input_focused();
        let style = if focused {
            INPUT_FOCUSED_STYLE
        } else {
            INPUT_STYLE
        };
        buf.set_style(input, style);

        let text = self.widget.input().visible_text();
        let mut line = format!("> {text}");
        if focused {
            line.push('_');
        }
        let row = input.y + input.height / 2;
        let width = usize::from(input.width.saturating_sub(1));
        buf.set_stringn(input.x + 1, row, &line, width, style);
    }
}

impl Widget for ChatOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let viewport = self.cells.viewport(area.width, area.height);
        let layout = self.widget.layout();
        let origin = layout.origin(viewport, self.widget.offset());
        let place = |rect: PxRect| self.cells.to_cells(rect.translate(origin.x, origin.y), area);

        let whole = PxRect::new(0, 0, layout.size.width, layout.size.height);
        let Some(frame) = place(whole) else {
            return;
        };
        Clear.render(frame, buf);
        buf.set_style(frame, LOG_STYLE);

        let header = PxRect::new(0, 0, layout.size.width, layout.toggle.height);
        if let Some(header) = place(header) {
            buf.set_style(header, HEADER_STYLE);
        }
        if let Some(toggle) = place(layout.toggle) {
            buf.set_style(toggle, TOGGLE_STYLE);
            buf.set_stringn(
                toggle.x,
                toggle.y,
                self.toggle_label(),
                usize::from(toggle.width),
                TOGGLE_STYLE,
            );
        }

        if let Some(log) = place(layout.log_area) {
            self.render_log(log, origin.y + layout.log_area.y, area, buf);
        }
        self.render_scrollbar(&place, buf);
        if let Some(input) = place(layout.input_box) {
            self.render_input(input, buf);
        }
    }
}

fn fill(buf: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for row in rect.top()..rect.bottom() {
        for col in rect.left()..rect.right() {
            buf[(col, row)].set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
