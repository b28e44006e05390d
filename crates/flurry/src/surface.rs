//! Braille-canvas drawing surface for the terminal.

use flurry_core::{Point, Rgb, Surface, Viewport, grid_cell};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
};

/// Braille dots per terminal cell, horizontally.
pub const DOTS_PER_CELL_X: u32 = 2;
/// Braille dots per terminal cell, vertically.
pub const DOTS_PER_CELL_Y: u32 = 4;

/// Dots of one color, in canvas coordinates.
#[derive(Debug, Clone)]
struct Stroke {
    color: Color,
    dots: Vec<(f64, f64)>,
}

/// Collects filled circles each frame and paints them as braille dots.
///
/// One pixel of the simulation is one braille dot.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    width: u32,
    height: u32,
    visible: bool,
    strokes: Vec<Stroke>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of dots drawn since the last clear.
    pub fn dot_count(&self) -> usize {
        self.strokes.iter().map(|s| s.dots.len()).sum()
    }

    fn push_dot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        // Canvas y grows upward.
        let dot = (x as f64 + 0.5, self.height as f64 - (y as f64 + 0.5));
        match self.strokes.last_mut() {
            Some(stroke) if stroke.color == color => stroke.dots.push(dot),
            _ => self.strokes.push(Stroke {
                color,
                dots: vec![dot],
            }),
        }
    }

    /// Paint the collected dots over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible || self.width == 0 || self.height == 0 {
            return;
        }
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, self.height as f64])
            .paint(|ctx| {
                for stroke in &self.strokes {
                    ctx.draw(&Points {
                        coords: &stroke.dots,
                        color: stroke.color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

impl Surface for TerminalSurface {
    fn is_usable(&self) -> bool {
        true
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.strokes.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn clear(&mut self, _width: u32, _height: u32) {
        self.strokes.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb) {
        let color = Color::Rgb(color.r, color.g, color.b);
        let (cx, cy) = grid_cell(center);
        let radius = radius.max(0.0);
        let reach = radius.ceil() as i64;
        let limit = radius * radius;
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let inside = (dx * dx + dy * dy) as f32 <= limit;
                if inside || (dx == 0 && dy == 0) {
                    self.push_dot(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

/// Terminal size expressed in braille dots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalViewport {
    cols: u16,
    rows: u16,
}

impl TerminalViewport {
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn set_cells(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Surface position at the center of a terminal cell.
    pub fn cell_center(column: u16, row: u16) -> Point {
        Point::new(
            (column as u32 * DOTS_PER_CELL_X + DOTS_PER_CELL_X / 2) as f32,
            (row as u32 * DOTS_PER_CELL_Y + DOTS_PER_CELL_Y / 2) as f32,
        )
    }
}

impl Viewport for TerminalViewport {
    fn size(&self) -> (u32, u32) {
        (
            self.cols as u32 * DOTS_PER_CELL_X,
            self.rows as u32 * DOTS_PER_CELL_Y,
        )
    }
}
