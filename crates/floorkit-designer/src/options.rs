//! Tunable constants of the scene builders, the editor and walk mode.
//!
//! Everything here is serde so that `floorkit-settings` can persist it.

use floorkit_core::units::{DEFAULT_CEILING_HEIGHT_M, DEFAULT_WALL_THICKNESS_M};
use serde::{Deserialize, Serialize};

/// Scene builder options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Wall height when the plan has no ceiling height, in meters.
    pub ceiling_height_m: f64,
    /// Wall thickness when a wall has none, in meters.
    pub wall_thickness_m: f64,
    pub window_line_count: usize,
    /// Distance between the outer window hairlines, in pixels.
    pub window_total_width: f64,
    pub door_arc_segments: usize,
    pub label_font_size: f64,
    pub label_padding: f64,
    pub label_text_height: f64,
    /// Estimated glyph width as a fraction of the font size.
    pub label_char_width: f64,
    /// Height of 3D label billboards above the floor, in meters.
    pub label_height_3d: f64,
    pub label_scale_3d: f64,
    pub selection_line_width: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            ceiling_height_m: DEFAULT_CEILING_HEIGHT_M,
            wall_thickness_m: DEFAULT_WALL_THICKNESS_M,
            window_line_count: 3,
            window_total_width: 6.0,
            door_arc_segments: 16,
            label_font_size: 14.0,
            label_padding: 8.0,
            label_text_height: 20.0,
            label_char_width: 0.6,
            label_height_3d: 2.0,
            label_scale_3d: 2.0,
            selection_line_width: 3.0,
        }
    }
}

impl SceneOptions {
    /// Estimated rendered width of `text`, in pixels.
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.label_font_size * self.label_char_width
    }

    /// Width and height of the box drawn behind a label.
    pub fn label_box_size(&self, text: &str) -> (f64, f64) {
        (
            self.text_width(text) + self.label_padding * 2.0,
            self.label_text_height + self.label_padding * 2.0,
        )
    }
}

/// Hit-test tolerances of the 2D editor, in plan pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerances {
    pub label_half_width: f64,
    pub label_half_height: f64,
    pub window_distance: f64,
    pub door_distance: f64,
    /// Allowed difference between the triangle-area sum and the wall area.
    pub wall_area: f64,
}

impl Default for HitTolerances {
    fn default() -> Self {
        Self {
            label_half_width: 50.0,
            label_half_height: 15.0,
            window_distance: 10.0,
            door_distance: 8.0,
            wall_area: 1.0,
        }
    }
}

/// Editor behavior options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub history_capacity: usize,
    /// Offset applied to both axes of a pasted element, in pixels.
    pub paste_offset: f64,
    /// Pointer travel above which a press/release pair is a pan, in screen pixels.
    pub click_threshold: f64,
    pub hit: HitTolerances,
    /// Scale used by the element factory.
    pub factory_px_per_meter: f64,
    /// Where the element factory places new elements.
    pub factory_origin: (f64, f64),
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            paste_offset: 50.0,
            click_threshold: 5.0,
            hit: HitTolerances::default(),
            factory_px_per_meter: 54.5,
            factory_origin: (500.0, 400.0),
        }
    }
}

/// First-person walk options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    pub eye_height_m: f64,
    pub collision_radius_m: f64,
    /// Meters per second.
    pub walk_speed: f64,
    pub run_multiplier: f64,
    /// Spawn offset along world z, in meters.
    pub spawn_offset_m: f64,
    /// Radians per pixel of mouse travel.
    pub look_sensitivity: f64,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            eye_height_m: 1.7,
            collision_radius_m: 0.3,
            walk_speed: 2.0,
            run_multiplier: 2.0,
            spawn_offset_m: 0.5,
            look_sensitivity: 0.002,
        }
    }
}
