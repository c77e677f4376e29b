//! Colors and the editor palette.
//!
//! Role, load-bearing and zone-type colors for the 2D view, plus the
//! material defaults of the 3D view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data::{Role, Wall, ZoneType};

/// An 8-bit RGBA color, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| format!("Invalid color: {}", hex))
        };

        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 | 8 if digits.is_ascii() => {
                let r = channel(&digits[0..2])?;
                let g = channel(&digits[2..4])?;
                let b = channel(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    channel(&digits[6..8])?
                } else {
                    255
                };
                Ok(Self::rgba(r, g, b, a))
            }
            _ => Err(format!("Invalid color: {}", hex)),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Gray that door glyphs are muted towards.
pub const DOOR_MUTE_GRAY: Color = Color::rgb(0x88, 0x88, 0x88);

/// Share of [`DOOR_MUTE_GRAY`] mixed into door colors.
pub const DOOR_MUTE_AMOUNT: f64 = 0.5;

/// Per-role colors of one element family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleColors {
    pub existing: Color,
    pub new: Color,
    pub modified: Color,
    pub to_delete: Color,
}

impl RoleColors {
    pub fn get(&self, role: Role) -> Color {
        match role {
            Role::Existing => self.existing,
            Role::New => self.new,
            Role::Modified => self.modified,
            Role::ToDelete => self.to_delete,
        }
    }
}

/// Colors used by the scene builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub canvas_bg: Color,
    pub wall: RoleColors,
    pub wall_load_bearing: Color,
    pub door: RoleColors,
    pub window: RoleColors,
    pub zone_risk: Color,
    pub zone_wet: Color,
    pub zone_default: Color,
    pub label_bg: Color,
    pub label_text: Color,
    pub stroke: Color,
    pub primary: Color,
    pub selection: Color,
    pub wall_3d: Color,
    pub floor_3d: Color,
    pub placeholder_3d: Color,
    pub background_3d: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            canvas_bg: Color::rgb(0xff, 0xff, 0xff),
            wall: RoleColors {
                existing: Color::rgb(0x4a, 0x4a, 0x4a),
                new: Color::rgb(0x2e, 0x7d, 0x32),
                modified: Color::rgb(0xf9, 0xa8, 0x25),
                to_delete: Color::rgb(0xd3, 0x2f, 0x2f),
            },
            wall_load_bearing: Color::rgb(0x1a, 0x1a, 0x1a),
            door: RoleColors {
                existing: Color::rgb(0x6d, 0x4c, 0x41),
                new: Color::rgb(0x43, 0xa0, 0x47),
                modified: Color::rgb(0xfb, 0x8c, 0x00),
                to_delete: Color::rgb(0xe5, 0x39, 0x35),
            },
            window: RoleColors {
                existing: Color::rgb(0x02, 0x88, 0xd1),
                new: Color::rgb(0x26, 0xa6, 0x9a),
                modified: Color::rgb(0xff, 0xb3, 0x00),
                to_delete: Color::rgb(0xef, 0x53, 0x50),
            },
            zone_risk: Color::rgb(0xff, 0xcd, 0xd2),
            zone_wet: Color::rgb(0xb3, 0xe5, 0xfc),
            zone_default: Color::rgb(0xee, 0xee, 0xee),
            label_bg: Color::rgb(0xff, 0xff, 0xff),
            label_text: Color::rgb(0x21, 0x21, 0x21),
            stroke: Color::rgb(0x33, 0x33, 0x33),
            primary: Color::rgb(0x18, 0x18, 0x1b),
            selection: Color::rgb(0x21, 0x96, 0xf3),
            wall_3d: Color::rgb(0xcc, 0xcc, 0xcc),
            floor_3d: Color::rgb(0xf5, 0xf5, 0xf5),
            placeholder_3d: DOOR_MUTE_GRAY,
            background_3d: Color::rgb(0xf5, 0xf5, 0xf5),
        }
    }
}

impl Palette {
    /// Load-bearing walls take one color regardless of role.
    pub fn wall_color(&self, wall: &Wall) -> Color {
        if wall.is_load_bearing() {
            self.wall_load_bearing
        } else {
            self.wall.get(wall.role)
        }
    }

    /// Role color blended halfway towards gray.
    pub fn door_color(&self, role: Role) -> Color {
        self.door.get(role).lerp(&DOOR_MUTE_GRAY, DOOR_MUTE_AMOUNT)
    }

    pub fn window_color(&self, role: Role) -> Color {
        self.window.get(role)
    }

    pub fn zone_color(&self, zone_type: &ZoneType) -> Color {
        match zone_type {
            ZoneType::Risk => self.zone_risk,
            ZoneType::Wet => self.zone_wet,
            _ => self.zone_default,
        }
    }
}
