//! # Screen Layout
//!
//! Maps between terminal cells and the widget's logical pixels, and carves
//! the screen into the regions that both rendering and hit testing use.
//!
//! ```text
//! ┌──────────────────────── terminal ────────────────────────┐
//! │                                                          │
//! │                      ◤───────── window ─────────────────┐│
//! │                      │ MILO Chatbot           [?] [v]   ││  header
//! │                      │                                  ││
//! │                      │   conversation / info panel      ││  body
//! │                      │                                  ││
//! │                      │╭ input ─────────────────────╮╭───╮││
//! │                      ││                            ││ ➤ │││  input, send
//! │                      │╰────────────────────────────╯╰───╯││
//! │                      └──────────────────────────────────┘│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The window is anchored bottom-right; the resize handle is its top-left
//! corner, so dragging it left or up grows the window.

use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

use crate::core::config::ResolvedConfig;
use crate::core::geometry::{Geometry, Point, Viewport};

/// Text inside the closed-state toggle button.
pub const LAUNCHER_LABEL: &str = " 💬 ";
pub const INFO_BUTTON: &str = "[?]";
pub const CLOSE_BUTTON: &str = "[v]";
pub const SEND_GLYPH: &str = "➤";
/// Bordered send button beside the input box.
const SEND_BUTTON_COLS: u16 = 5;

/// Smallest window that still shows a header, one body row and an input box.
const MIN_WINDOW_COLS: u16 = 16;
const MIN_WINDOW_ROWS: u16 = 8;

/// Logical pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width_px: f64,
    pub height_px: f64,
}

impl CellMetrics {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.cell_width_px, config.cell_height_px)
    }

    /// Terminal size in logical pixels.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            f64::from(cols) * self.width_px,
            f64::from(rows) * self.height_px,
        )
    }

    /// Logical position of a cell's top-left corner.
    pub fn pointer(&self, col: u16, row: u16) -> Point {
        Point::new(
            f64::from(col) * self.width_px,
            f64::from(row) * self.height_px,
        )
    }

    /// Window size in cells, rounded to the nearest cell.
    pub fn cells(&self, geometry: Geometry) -> (u16, u16) {
        let cols = (geometry.width / self.width_px).round();
        let rows = (geometry.height / self.height_px).round();
        (to_cells(cols), to_cells(rows))
    }
}

fn to_cells(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Closed-state toggle button, bottom-right of the screen.
pub fn launcher_rect(area: Rect) -> Rect {
    let width = (LAUNCHER_LABEL.width() as u16 + 2).min(area.width);
    let height = 3u16.min(area.height);
    Rect::new(
        area.right().saturating_sub(width),
        area.bottom().saturating_sub(height),
        width,
        height,
    )
}

/// Regions of the open chat window, in screen cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub window: Rect,
    pub resize_handle: Rect,
    pub header: Rect,
    pub info_button: Rect,
    pub close_button: Rect,
    /// Conversation or info panel.
    pub body: Rect,
    /// Input box; `None` while the info panel is shown.
    pub input: Option<Rect>,
    /// Send button right of the input box, same height.
    pub send_button: Option<Rect>,
}

/// Columns left for the input box in a body `body_width` cells wide.
pub fn input_cols(body_width: u16) -> u16 {
    body_width.saturating_sub(SEND_BUTTON_COLS)
}

impl WindowLayout {
    /// Lay out the window for `geometry` inside `area`.
    ///
    /// `input_height` is the input box height for the current draft, or
    /// `None` when the input box is hidden.
    pub fn compute(
        area: Rect,
        geometry: Geometry,
        metrics: CellMetrics,
        input_height: Option<u16>,
    ) -> Self {
        let (cols, rows) = metrics.cells(geometry);
        let width = cols.clamp(MIN_WINDOW_COLS.min(area.width), area.width);
        let height = rows.clamp(MIN_WINDOW_ROWS.min(area.height), area.height);
        let window = Rect::new(
            area.right().saturating_sub(width),
            area.bottom().saturating_sub(height),
            width,
            height,
        );

        let resize_handle = Rect::new(window.x, window.y, 1.min(width), 1.min(height));

        let inner = Rect::new(
            window.x.saturating_add(1),
            window.y.saturating_add(1),
            window.width.saturating_sub(2),
            window.height.saturating_sub(2),
        );

        let header = Rect::new(inner.x, inner.y, inner.width, 1.min(inner.height));
        let button_width = CLOSE_BUTTON.width() as u16;
        let close_button = Rect::new(
            header.right().saturating_sub(button_width + 1),
            header.y,
            button_width.min(header.width),
            header.height,
        );
        let info_button = Rect::new(
            close_button.x.saturating_sub(button_width + 1),
            header.y,
            button_width.min(header.width),
            header.height,
        );

        let below_header = inner.height.saturating_sub(header.height);
        let input_row = input_height.map(|h| {
            // Keep at least one body row.
            let h = h.min(below_header.saturating_sub(1));
            Rect::new(inner.x, inner.bottom().saturating_sub(h), inner.width, h)
        });
        let input = input_row.map(|row| Rect {
            width: input_cols(row.width),
            ..row
        });
        let send_button = input_row.map(|row| {
            let width = SEND_BUTTON_COLS.min(row.width);
            Rect::new(row.right() - width, row.y, width, row.height)
        });
        let body_height = below_header.saturating_sub(input_row.map_or(0, |r| r.height));
        let body = Rect::new(inner.x, header.bottom(), inner.width, body_height);

        Self {
            window,
            resize_handle,
            header,
            info_button,
            close_button,
            body,
            input,
            send_button,
        }
    }
}

/// Whether the cell at (`col`, `row`) lies inside `rect`.
pub fn hits(rect: Rect, col: u16, row: u16) -> bool {
    rect.contains(Position::new(col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> CellMetrics {
        CellMetrics::new(8.0, 16.0)
    }

    #[test]
    fn test_viewport_and_pointer_scale_by_cell_size() {
        let m = metrics();
        assert_eq!(m.viewport(120, 50), Viewport::new(960.0, 800.0));
        assert_eq!(m.pointer(10, 3), Point::new(80.0, 48.0));
    }

    #[test]
    fn test_default_geometry_in_cells() {
        // 500 / 8 = 62.5 → 63, 600 / 16 = 37.5 → 38
        assert_eq!(metrics().cells(Geometry::default()), (63, 38));
    }

    #[test]
    fn test_launcher_bottom_right() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = launcher_rect(area);
        assert_eq!(rect.right(), 80);
        assert_eq!(rect.bottom(), 24);
        assert_eq!(rect.height, 3);
        // emoji is two cells wide, plus two spaces and two borders
        assert_eq!(rect.width, 6);
    }

    #[test]
    fn test_window_anchored_bottom_right() {
        let area = Rect::new(0, 0, 200, 60);
        let layout = WindowLayout::compute(area, Geometry::default(), metrics(), Some(3));

        assert_eq!(layout.window, Rect::new(137, 22, 63, 38));
        assert_eq!(layout.resize_handle, Rect::new(137, 22, 1, 1));
        assert_eq!(layout.header, Rect::new(138, 23, 61, 1));
        assert_eq!(layout.input, Some(Rect::new(138, 56, 56, 3)));
        assert_eq!(layout.send_button, Some(Rect::new(194, 56, 5, 3)));
        assert_eq!(layout.body, Rect::new(138, 24, 61, 32));
        assert!(hits(layout.close_button, 196, 23));
        assert!(hits(layout.info_button, 192, 23));
        assert!(!hits(layout.info_button, 196, 23));
    }

    #[test]
    fn test_window_clipped_to_small_terminal() {
        let area = Rect::new(0, 0, 40, 12);
        let layout = WindowLayout::compute(area, Geometry::default(), metrics(), Some(3));
        assert_eq!(layout.window, area);
    }

    #[test]
    fn test_window_never_below_minimum_cells() {
        let area = Rect::new(0, 0, 200, 60);
        let tiny = Geometry {
            width: 8.0,
            height: 16.0,
        };
        let layout = WindowLayout::compute(area, tiny, metrics(), None);
        assert_eq!(layout.window.width, MIN_WINDOW_COLS);
        assert_eq!(layout.window.height, MIN_WINDOW_ROWS);
    }

    #[test]
    fn test_hidden_input_gives_body_full_height() {
        let area = Rect::new(0, 0, 200, 60);
        let layout = WindowLayout::compute(area, Geometry::default(), metrics(), None);
        assert_eq!(layout.input, None);
        assert_eq!(layout.send_button, None);
        assert_eq!(layout.body.height, 38 - 2 - 1);
    }
}
