//! Canvas viewport and the screen → flow coordinate capability.
//!
//! The rendering engine owns pan and zoom; the core only needs to ask
//! "which flow coordinate is under this screen point". Any engine that can
//! answer that through [`CanvasTransform`] can host the editor.

use serde::{Deserialize, Serialize};

/// A 2-D point. Used both for screen coordinates and flow positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in flow coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Pan offset and zoom of the canvas. Persisted with the document so a
/// load restores the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Resolves screen coordinates to flow coordinates under the current view.
pub trait CanvasTransform {
    fn screen_to_flow(&self, screen: Point) -> Point;
}

/// Transform for a canvas whose top-left corner sits at `origin` in screen
/// space and shows `viewport`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewTransform {
    pub origin: Point,
    pub viewport: Viewport,
    /// Optional grid the result is snapped to.
    pub snap_grid: Option<(f64, f64)>,
}

impl ViewTransform {
    pub fn new(origin: Point, viewport: Viewport) -> Self {
        Self {
            origin,
            viewport,
            snap_grid: None,
        }
    }

    pub fn with_snap_grid(mut self, grid: Option<(f64, f64)>) -> Self {
        self.snap_grid = grid;
        self
    }
}

impl CanvasTransform for ViewTransform {
    fn screen_to_flow(&self, screen: Point) -> Point {
        // A zero zoom would divide by zero; treat it as 1.
        let zoom = if self.viewport.zoom == 0.0 {
            1.0
        } else {
            self.viewport.zoom
        };
        let x = (screen.x - self.origin.x - self.viewport.x) / zoom;
        let y = (screen.y - self.origin.y - self.viewport.y) / zoom;
        match self.snap_grid {
            Some((gx, gy)) if gx > 0.0 && gy > 0.0 => {
                Point::new((x / gx).round() * gx, (y / gy).round() * gy)
            }
            _ => Point::new(x, y),
        }
    }
}

/// Options for [`fit_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Fraction of the canvas left empty around the content.
    pub padding: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: 0.1,
            min_zoom: 0.5,
            max_zoom: 2.0,
        }
    }
}

/// Viewport that centres `bounds` inside a canvas of `canvas_width` ×
/// `canvas_height` pixels.
pub fn fit_view(bounds: Rect, canvas_width: f64, canvas_height: f64, opts: FitOptions) -> Viewport {
    let w = bounds.width.max(1.0);
    let h = bounds.height.max(1.0);
    let zoom_x = canvas_width / (w * (1.0 + opts.padding));
    let zoom_y = canvas_height / (h * (1.0 + opts.padding));
    let zoom = zoom_x.min(zoom_y).clamp(opts.min_zoom, opts.max_zoom);
    let center = bounds.center();
    Viewport {
        x: canvas_width / 2.0 - center.x * zoom,
        y: canvas_height / 2.0 - center.y * zoom,
        zoom,
    }
}
