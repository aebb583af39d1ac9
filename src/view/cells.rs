//! Conversion between terminal cells and host pixels.

use crate::model::{Point, PxRect, Size};
use crate::state::MonospaceMeasurer;
use ratatui::layout::Rect;

/// Pixel size of one terminal cell.
///
/// The widget core works in pixels; the terminal host pretends every cell is
/// `cell_width x cell_height` pixels so the same geometry drives both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    cell_width: i32,
    cell_height: i32,
}

impl CellGeometry {
    /// Create a geometry. Zero sizes are bumped to one pixel.
    pub fn new(cell_width: u16, cell_height: u16) -> Self {
        Self {
            cell_width: i32::from(cell_width.max(1)),
            cell_height: i32::from(cell_height.max(1)),
        }
    }

    /// Pixels per column.
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }

    /// Pixels per row.
    pub fn cell_height(&self) -> i32 {
        self.cell_height
    }

    /// Text measurer matching this geometry.
    pub fn measurer(&self) -> MonospaceMeasurer {
        MonospaceMeasurer::new(self.cell_width, self.cell_height)
    }

    /// Viewport size in pixels for an area of `cols x rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Size {
        Size::new(
            i32::from(cols) * self.cell_width,
            i32::from(rows) * self.cell_height,
        )
    }

    /// Pixel at the centre of a cell.
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            i32::from(col) * self.cell_width + self.cell_width / 2,
            i32::from(row) * self.cell_height + self.cell_height / 2,
        )
    }

    /// Cells covered by a pixel rectangle, clipped to `area`.
    ///
    /// Pixel coordinates are relative to the top-left of `area`. Partially
    /// covered cells count as covered. Returns `None` when nothing of the
    /// rectangle lands inside `area`.
    pub fn to_cells(&self, rect: PxRect, area: Rect) -> Option<Rect> {
        if rect.is_empty() {
            return None;
        }

        let left = rect.x.div_euclid(self.cell_width).max(0);
        let top = rect.y.div_euclid(self.cell_height).max(0);
        let right = ceil_div(rect.right(), self.cell_width).min(i32::from(area.width));
        let bottom = ceil_div(rect.bottom(), self.cell_height).min(i32::from(area.height));
        if left >= right || top >= bottom {
            return None;
        }

        Some(Rect::new(
            area.x + to_u16(left),
            area.y + to_u16(top),
            to_u16(right - left),
            to_u16(bottom - top),
        ))
    }

    /// Terminal row holding pixel row `y`, if it is inside `area`.
    pub fn row_of(&self, y: i32, area: Rect) -> Option<u16> {
        let row = y.div_euclid(self.cell_height);
        (0..i32::from(area.height))
            .contains(&row)
            .then(|| area.y + to_u16(row))
    }
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    -((-value).div_euclid(divisor))
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}
