//! Checkerboard backdrop standing in for the board surface.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Square width in columns. Terminal cells are roughly twice as tall as
/// they are wide, so squares are twice as wide as they are tall.
const SQUARE_COLS: u16 = 4;
/// Square height in rows.
const SQUARE_ROWS: u16 = 2;

/// Light and dark squares filling the whole frame.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    light: Color,
    dark: Color,
}

impl Board {
    /// Board with the default wood-ish palette.
    pub fn new() -> Self {
        Self {
            light: Color::Rgb(222, 184, 135),
            dark: Color::Rgb(139, 90, 43),
        }
    }

    /// Background colour of the square covering a cell relative to the board
    /// origin.
    pub fn square_color(&self, col: u16, row: u16) -> Color {
        if (col / SQUARE_COLS + row / SQUARE_ROWS) % 2 == 0 {
            self.light
        } else {
            self.dark
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Board {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let style = Style::default().bg(self.square_color(col, row));
                buf[(area.x + col, area.y + row)].set_char(' ').set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_alternate_horizontally_and_vertically() {
        let board = Board::new();
        assert_eq!(board.square_color(0, 0), board.light);
        assert_eq!(board.square_color(3, 1), board.light);
        assert_eq!(board.square_color(4, 0), board.dark);
        assert_eq!(board.square_color(0, 2), board.dark);
        assert_eq!(board.square_color(4, 2), board.light);
    }

    #[test]
    fn render_paints_every_cell() {
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);
        Board::new().render(area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, Color::Rgb(222, 184, 135));
        assert_eq!(buf[(4, 0)].bg, Color::Rgb(139, 90, 43));
        assert_eq!(buf[(7, 3)].bg, Color::Rgb(222, 184, 135));
    }
}
