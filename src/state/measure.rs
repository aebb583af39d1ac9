//! Host text-measurement capability.

use unicode_width::UnicodeWidthStr;

/// Pixel measurements supplied by the host rendering surface.
///
/// The widget never draws text itself; it only asks the host how wide a
/// string would render and how tall one line is.
pub trait TextMeasurer {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> i32;

    /// Height of one rendered line in pixels.
    fn line_height(&self) -> i32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn text_width(&self, text: &str) -> i32 {
        (**self).text_width(text)
    }

    fn line_height(&self) -> i32 {
        (**self).line_height()
    }
}

/// Fixed-pitch measurer: display columns times a per-column pixel width.
///
/// Used by the terminal host, where one cell spans `cell_width x
/// line_height` pixels, and by tests that need predictable widths. Wide
/// (CJK) characters count as two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasurer {
    cell_width: i32,
    line_height: i32,
}

impl MonospaceMeasurer {
    /// Create a measurer with the given cell size in pixels.
    pub fn new(cell_width: i32, line_height: i32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }

    /// Pixels per display column.
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn text_width(&self, text: &str) -> i32 {
        let columns = i32::try_from(text.width()).unwrap_or(i32::MAX);
        columns.saturating_mul(self.cell_width)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}
