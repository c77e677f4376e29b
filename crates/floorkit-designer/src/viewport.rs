//! Viewport and coordinate transformation for the plan canvas.
//!
//! Converts between screen pixels and plan pixels for an orthographic
//! top-down camera. Both spaces have y growing downwards, so the mapping is
//! a plain scale and offset:
//!
//! ```text
//! screen = plan * zoom + pan
//! plan   = (screen - pan) / zoom
//! ```

use std::fmt;

use floorkit_core::{Bounds, Point2};

/// Lowest zoom level accepted.
pub const MIN_ZOOM: f64 = 0.1;
/// Highest zoom level accepted.
pub const MAX_ZOOM: f64 = 50.0;
/// Factor applied by one zoom step.
pub const ZOOM_STEP: f64 = 1.2;
/// Fraction of the canvas kept free on each side by [`Viewport::fit_to_bounds`].
pub const VIEW_PADDING: f64 = 0.05;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a viewport with the plan origin at the top-left corner.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom level (1.0 = one plan pixel per screen pixel).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level if it lies strictly between [`MIN_ZOOM`] and [`MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts a screen position to plan coordinates.
    pub fn screen_to_plan(&self, screen_x: f64, screen_y: f64) -> Point2 {
        Point2::new(
            (screen_x - self.pan_x) / self.zoom,
            (screen_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts plan coordinates to a screen position.
    pub fn plan_to_screen(&self, plan: Point2) -> (f64, f64) {
        (plan.x * self.zoom + self.pan_x, plan.y * self.zoom + self.pan_y)
    }

    /// Converts a screen-space distance to plan pixels.
    pub fn screen_to_plan_distance(&self, distance: f64) -> f64 {
        distance / self.zoom
    }

    /// Fits the given plan bounds into the canvas.
    ///
    /// # Arguments
    /// * `bounds` - Region to show, in plan pixels
    /// * `padding` - Fraction of the canvas to keep free on each side (0.0 - 0.5)
    ///
    /// Empty or inverted bounds leave the viewport untouched.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        let width = bounds.width();
        let height = bounds.height();
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let padding_factor = 1.0 - padding * 2.0;
        let zoom_x = self.canvas_width * padding_factor / width;
        let zoom_y = self.canvas_height * padding_factor / height;
        let new_zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        let center = bounds.center();
        self.zoom = new_zoom;
        self.pan_x = self.canvas_width / 2.0 - center.x * new_zoom;
        self.pan_y = self.canvas_height / 2.0 - center.y * new_zoom;
    }

    /// Shows the whole plan sheet with the default padding.
    pub fn fit_to_plan(&mut self, width: f64, height: f64) {
        self.fit_to_bounds(&Bounds::new(0.0, 0.0, width, height), VIEW_PADDING);
    }

    /// Zooms so that `plan_point` keeps its screen position.
    ///
    /// Out-of-range zoom levels are ignored.
    pub fn zoom_to_point(&mut self, plan_point: Point2, new_zoom: f64) {
        if new_zoom <= MIN_ZOOM || new_zoom >= MAX_ZOOM {
            return;
        }
        let (sx, sy) = self.plan_to_screen(plan_point);
        self.zoom = new_zoom;
        self.pan_x = sx - plan_point.x * new_zoom;
        self.pan_y = sy - plan_point.y * new_zoom;
    }

    /// One wheel notch at a screen position. Negative `delta` zooms in.
    pub fn wheel_zoom(&mut self, screen_x: f64, screen_y: f64, delta: f64) {
        let anchor = self.screen_to_plan(screen_x, screen_y);
        let factor = if delta < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.zoom_to_point(anchor, self.zoom * factor);
    }

    /// Centers the canvas on a plan point.
    pub fn center_on(&mut self, plan_x: f64, plan_y: f64) {
        self.pan_x = self.canvas_width / 2.0 - plan_x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - plan_y * self.zoom;
    }

    /// Resets to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
