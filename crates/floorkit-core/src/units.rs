//! Unit conversion utilities
//!
//! Handles conversion between plan pixels and meters, and the mapping from
//! the top-down plan (x right, y down) to the 3D world (x right, y up, plan
//! y becomes negative world z).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Scale used when a plan carries no `scale` block. Values are then taken
/// to already be in meters.
pub const DEFAULT_PX_PER_METER: f64 = 1.0;

/// Scale used by human-readable descriptions when the plan has no scale.
pub const DISPLAY_PX_PER_METER: f64 = 40.0;

/// Wall thickness assumed when a wall carries none.
pub const DEFAULT_WALL_THICKNESS_M: f64 = 0.2;

/// Ceiling height used when the plan carries none.
pub const DEFAULT_CEILING_HEIGHT_M: f64 = 2.5;

/// Unit tag stored in the plan metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Plan pixels
    Px,
    /// Meters
    M,
    /// Centimeters
    Cm,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Px
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px => write!(f, "px"),
            Self::M => write!(f, "m"),
            Self::Cm => write!(f, "cm"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(Self::Px),
            "m" | "meter" | "meters" => Ok(Self::M),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Cm),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Pixel/meter scale of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    px_per_meter: f64,
}

impl Scale {
    pub fn new(px_per_meter: f64) -> Self {
        Self { px_per_meter }
    }

    /// Resolves an optional plan scale, falling back to 1 px/m.
    ///
    /// Zero, negative and non-finite values count as absent.
    pub fn from_optional(px_per_meter: Option<f64>) -> Self {
        Self::new(usable_px_per_meter(px_per_meter).unwrap_or(DEFAULT_PX_PER_METER))
    }

    pub fn px_per_meter(&self) -> f64 {
        self.px_per_meter
    }

    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        meters_to_pixels(meters, self.px_per_meter)
    }

    pub fn pixels_to_meters(&self, pixels: f64) -> f64 {
        pixels_to_meters(pixels, self.px_per_meter)
    }

    /// Maps a plan point to world coordinates `(x, up, z)`.
    ///
    /// Plan y grows downwards on screen and becomes negative world z.
    pub fn plan_to_world(&self, x: f64, y: f64, up: f64) -> (f64, f64, f64) {
        (x / self.px_per_meter, up, -y / self.px_per_meter)
    }

    /// Maps world `(x, z)` back to plan pixels.
    pub fn world_to_plan(&self, world_x: f64, world_z: f64) -> (f64, f64) {
        (world_x * self.px_per_meter, -world_z * self.px_per_meter)
    }

    /// Converts an area in square pixels to square meters.
    pub fn area_to_square_meters(&self, area_px: f64) -> f64 {
        area_px / (self.px_per_meter * self.px_per_meter)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(DEFAULT_PX_PER_METER)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} px/m", self.px_per_meter)
    }
}

/// Drops a scale value that cannot divide a length.
pub fn usable_px_per_meter(px_per_meter: Option<f64>) -> Option<f64> {
    match px_per_meter {
        Some(value) if value.is_finite() && value > 0.0 => Some(value),
        Some(value) => {
            warn!("Ignoring unusable scale {} px/m", value);
            None
        }
        None => None,
    }
}

pub fn meters_to_pixels(meters: f64, px_per_meter: f64) -> f64 {
    meters * px_per_meter
}

pub fn pixels_to_meters(pixels: f64, px_per_meter: f64) -> f64 {
    pixels / px_per_meter
}

/// Format a meter value for display with two decimals
pub fn format_meters(value_m: f64) -> String {
    format!("{:.2}", value_m)
}

/// Parse a meter value typed into an edit field
///
/// Accepts both `.` and `,` as decimal separator. Empty input parses as 0.
///
/// * `input` - String to parse
pub fn parse_meters(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    input
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("Invalid number: {}", input))
}
