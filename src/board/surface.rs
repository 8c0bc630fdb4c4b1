//! Drawing surfaces the board renderer can target.
//!
//! The renderer never touches a canvas directly. It talks to a [`DrawSurface`],
//! which is either a real 2D canvas context in the browser or an in-memory
//! command recorder for headless runs and tests.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::geometry::{CanvasExtent, Point};

/// Line color and width for outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
}

impl<'a> Stroke<'a> {
    pub const fn new(color: &'a str, width: f64) -> Self {
        Self { color, width }
    }
}

/// Minimal set of primitives the board needs.
pub trait DrawSurface {
    /// Size the surface to `extent` and erase everything drawn so far.
    fn clear(&mut self, extent: CanvasExtent);
    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke<'_>);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, stroke: Stroke<'_>);
    fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str);
}

/// A `<canvas>` element with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, extent: CanvasExtent) {
        let width = extent.width.ceil() as u32;
        let height = extent.height.ceil() as u32;
        // Resizing resets the context, so only do it when the board size changed.
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        self.ctx
            .clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke<'_>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        if closed {
            self.ctx.close_path();
        }
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, stroke: Stroke<'_>) {
        self.ctx.begin_path();
        if let Err(err) = self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
        {
            log::warn!("arc at ({}, {}) failed: {}", center.x, center.y, describe(&err));
            return;
        }
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, at.x, at.y).ok();
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// One primitive as seen by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(CanvasExtent),
    Path {
        points: Vec<Point>,
        closed: bool,
        color: String,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: String,
        stroke: String,
    },
    Text {
        text: String,
        at: Point,
        color: String,
    },
}

/// In-memory surface. Clearing drops every earlier command, like a canvas
/// drops its pixels, so the command list is exactly what is "on screen".
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Open paths stroked in `color`.
    pub fn open_paths(&self, color: &str) -> Vec<&[Point]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Path {
                    points,
                    closed: false,
                    color: path_color,
                    ..
                } if path_color == color => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn closed_paths(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Path { closed: true, .. }))
            .count()
    }

    pub fn circles(&self) -> Vec<(Point, f64, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                    ..
                } => Some((*center, *radius, fill.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, extent: CanvasExtent) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(extent));
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool, stroke: Stroke<'_>) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            closed,
            color: stroke.color.to_string(),
            width: stroke.width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, stroke: Stroke<'_>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: fill.to_string(),
            stroke: stroke.color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, _font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clear_discards_history() {
        let mut s = RecordingSurface::new();
        let stroke = Stroke::new("white", 3.0);
        s.stroke_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], false, stroke);
        s.fill_text("A", Point::new(2.0, 2.0), "12px sans-serif", "white");
        assert_eq!(s.commands().len(), 2);

        let extent = CanvasExtent {
            width: 10.0,
            height: 10.0,
        };
        s.clear(extent);
        assert_eq!(s.commands(), &[DrawCommand::Clear(extent)]);
    }

    #[test]
    fn test_recording_filters() {
        let mut s = RecordingSurface::new();
        s.stroke_path(&[Point::new(0.0, 0.0)], true, Stroke::new("white", 3.0));
        s.stroke_path(&[Point::new(0.0, 0.0)], false, Stroke::new("red", 3.0));
        s.stroke_path(&[Point::new(1.0, 0.0)], false, Stroke::new("blue", 3.0));
        s.fill_circle(Point::new(5.0, 5.0), 2.0, "red", Stroke::new("red", 2.0));
        assert_eq!(s.closed_paths(), 1);
        assert_eq!(s.open_paths("red").len(), 1);
        assert_eq!(s.open_paths("blue"), vec![&[Point::new(1.0, 0.0)][..]]);
        assert_eq!(s.circles(), vec![(Point::new(5.0, 5.0), 2.0, "red")]);
    }
}
