//! Plan elements: walls, zones, doors, windows and labels.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::geometry::{PointGeometry, Polygon, Segment};
use crate::polygon::Bounds;
use crate::units::{Scale, DEFAULT_WALL_THICKNESS_M};

/// Identifier of an element, unique within a document.
pub type ElementId = String;

/// Window type used by the element factory.
pub const STANDARD_WINDOW: &str = "STANDARD";

/// Lifecycle tag of a wall, door or window. Drives styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Existing,
    New,
    Modified,
    ToDelete,
}

/// Discriminant of [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wall,
    Zone,
    Door,
    Window,
    Label,
}

impl ElementKind {
    /// Prefix used when generating ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Zone => "zone",
            Self::Door => "door",
            Self::Window => "window",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad grouping of zone types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneCategory {
    PublicZones,
    UtilityZones,
    PrivateZones,
    OutdoorZones,
}

/// Room or area classification of a zone.
///
/// Unknown names survive a load/save cycle through [`ZoneType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneType {
    LivingRoom,
    DinningRoom,
    Kitchen,
    EntranceHall,
    Bathroom,
    LaundryRoom,
    Bedroom,
    KidsRoom,
    Wardrobe,
    HomeOffice,
    Balcony,
    Veranda,
    Loggia,
    Risk,
    Wet,
    Other(String),
}

impl ZoneType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LivingRoom => "living_room",
            Self::DinningRoom => "dinning_room",
            Self::Kitchen => "kitchen",
            Self::EntranceHall => "entrance_hall",
            Self::Bathroom => "bathroom",
            Self::LaundryRoom => "laundry_room",
            Self::Bedroom => "bedroom",
            Self::KidsRoom => "kids_room",
            Self::Wardrobe => "wardrobe",
            Self::HomeOffice => "home_office",
            Self::Balcony => "balcony",
            Self::Veranda => "veranda",
            Self::Loggia => "loggia",
            Self::Risk => "RISK",
            Self::Wet => "wet",
            Self::Other(name) => name,
        }
    }

    /// Human-readable name, `None` for unknown types.
    pub fn display_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::LivingRoom => "Living room",
            Self::DinningRoom => "Dining room",
            Self::Kitchen => "Kitchen",
            Self::EntranceHall => "Entrance hall",
            Self::Bathroom => "Bathroom",
            Self::LaundryRoom => "Laundry room",
            Self::Bedroom => "Bedroom",
            Self::KidsRoom => "Kids room",
            Self::Wardrobe => "Wardrobe",
            Self::HomeOffice => "Home office",
            Self::Balcony => "Balcony",
            Self::Veranda => "Veranda",
            Self::Loggia => "Loggia",
            Self::Risk => "Risk zone",
            Self::Wet => "Wet zone",
            Self::Other(_) => return None,
        };
        Some(name)
    }

    pub fn category(&self) -> Option<ZoneCategory> {
        match self {
            Self::LivingRoom | Self::DinningRoom => Some(ZoneCategory::PublicZones),
            Self::Kitchen | Self::EntranceHall | Self::Bathroom | Self::LaundryRoom => {
                Some(ZoneCategory::UtilityZones)
            }
            Self::Bedroom | Self::KidsRoom | Self::Wardrobe | Self::HomeOffice => {
                Some(ZoneCategory::PrivateZones)
            }
            Self::Balcony | Self::Veranda | Self::Loggia => Some(ZoneCategory::OutdoorZones),
            Self::Risk | Self::Wet | Self::Other(_) => None,
        }
    }
}

impl Default for ZoneType {
    fn default() -> Self {
        Self::LivingRoom
    }
}

impl From<String> for ZoneType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "living_room" => Self::LivingRoom,
            "dinning_room" => Self::DinningRoom,
            "kitchen" => Self::Kitchen,
            "entrance_hall" => Self::EntranceHall,
            "bathroom" => Self::Bathroom,
            "laundry_room" => Self::LaundryRoom,
            "bedroom" => Self::Bedroom,
            "kids_room" => Self::KidsRoom,
            "wardrobe" => Self::Wardrobe,
            "home_office" => Self::HomeOffice,
            "balcony" => Self::Balcony,
            "veranda" => Self::Veranda,
            "loggia" => Self::Loggia,
            "RISK" => Self::Risk,
            "wet" => Self::Wet,
            _ => Self::Other(s),
        }
    }
}

impl From<ZoneType> for String {
    fn from(zone_type: ZoneType) -> Self {
        match zone_type {
            ZoneType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional per-element material override for the 3D view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: ElementId,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub load_bearing: Option<bool>,
    /// Thickness in plan pixels.
    #[serde(default)]
    pub thickness: Option<f64>,
    pub geometry: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_geometry: Option<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl Wall {
    pub fn is_load_bearing(&self) -> bool {
        self.load_bearing.unwrap_or(false)
    }

    /// Thickness in pixels, falling back to 0.2 m when unset or not positive.
    pub fn thickness_px(&self, scale: &Scale) -> f64 {
        self.thickness
            .filter(|t| *t > 0.0)
            .unwrap_or_else(|| scale.meters_to_pixels(DEFAULT_WALL_THICKNESS_M))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ElementId,
    #[serde(default)]
    pub zone_type: ZoneType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_to: Vec<ElementId>,
    pub geometry: Polygon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_geometry: Option<Polygon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: ElementId,
    #[serde(default)]
    pub role: Role,
    pub geometry: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_geometry: Option<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: ElementId,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_window_type")]
    pub window_type: String,
    #[serde(rename = "sillHeight_m", default)]
    pub sill_height_m: f64,
    pub geometry: Segment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_geometry: Option<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: ElementId,
    #[serde(default)]
    pub text: String,
    pub geometry: PointGeometry,
}

fn default_window_type() -> String {
    STANDARD_WINDOW.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One item of the floor plan, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Wall(Wall),
    Zone(Zone),
    Door(Door),
    Window(Window),
    Label(Label),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Self::Wall(w) => &w.id,
            Self::Zone(z) => &z.id,
            Self::Door(d) => &d.id,
            Self::Window(w) => &w.id,
            Self::Label(l) => &l.id,
        }
    }

    pub fn set_id(&mut self, id: impl Into<ElementId>) {
        let id = id.into();
        match self {
            Self::Wall(w) => w.id = id,
            Self::Zone(z) => z.id = id,
            Self::Door(d) => d.id = id,
            Self::Window(w) => w.id = id,
            Self::Label(l) => l.id = id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Wall(_) => ElementKind::Wall,
            Self::Zone(_) => ElementKind::Zone,
            Self::Door(_) => ElementKind::Door,
            Self::Window(_) => ElementKind::Window,
            Self::Label(_) => ElementKind::Label,
        }
    }

    /// Labels are neither rotated nor dragged.
    pub fn is_rotatable(&self) -> bool {
        !matches!(self, Self::Label(_))
    }

    /// Current absolute rotation in degrees, 0 when unset.
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Wall(w) => w.rotation,
            Self::Zone(z) => z.rotation,
            Self::Door(d) => d.rotation,
            Self::Window(w) => w.rotation,
            Self::Label(_) => None,
        }
        .unwrap_or(0.0)
    }

    /// Moves the geometry and the stored base geometry by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Wall(w) => {
                w.geometry = w.geometry.translated(dx, dy);
                w.base_geometry = w.base_geometry.map(|b| b.translated(dx, dy));
            }
            Self::Zone(z) => {
                z.geometry = z.geometry.translated(dx, dy);
                z.base_geometry = z.base_geometry.as_ref().map(|b| b.translated(dx, dy));
            }
            Self::Door(d) => {
                d.geometry = d.geometry.translated(dx, dy);
                d.base_geometry = d.base_geometry.map(|b| b.translated(dx, dy));
            }
            Self::Window(w) => {
                w.geometry = w.geometry.translated(dx, dy);
                w.base_geometry = w.base_geometry.map(|b| b.translated(dx, dy));
            }
            Self::Label(l) => l.geometry = l.geometry.translated(dx, dy),
        }
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Element {
        let mut moved = self.clone();
        moved.translate(dx, dy);
        moved
    }

    /// Bounding box of the current geometry. Labels give a zero-size box.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Wall(w) => Some(w.geometry.bounds()),
            Self::Door(d) => Some(d.geometry.bounds()),
            Self::Window(w) => Some(w.geometry.bounds()),
            Self::Zone(z) => z.geometry.bounds(),
            Self::Label(l) => Some(Bounds::new(
                l.geometry.x,
                l.geometry.y,
                l.geometry.x,
                l.geometry.y,
            )),
        }
    }

    /// Segment geometry of walls, doors and windows.
    pub fn segment(&self) -> Option<&Segment> {
        match self {
            Self::Wall(w) => Some(&w.geometry),
            Self::Door(d) => Some(&d.geometry),
            Self::Window(w) => Some(&w.geometry),
            _ => None,
        }
    }

    /// Brings the base geometry in line with the rotation.
    ///
    /// A rotated element without a base has it recovered once by rotating
    /// the current geometry back. An unrotated element drops its base, the
    /// geometry itself is the base then.
    pub fn normalize(&mut self) {
        let angle = self.rotation();
        match self {
            Self::Wall(w) => normalize_segment(&w.geometry, &mut w.base_geometry, angle),
            Self::Door(d) => normalize_segment(&d.geometry, &mut d.base_geometry, angle),
            Self::Window(w) => normalize_segment(&w.geometry, &mut w.base_geometry, angle),
            Self::Zone(z) => {
                if angle == 0.0 {
                    z.base_geometry = None;
                } else if z.base_geometry.is_none() {
                    z.base_geometry = Some(z.geometry.rotated(-angle));
                }
            }
            Self::Label(_) => {}
        }
    }
}

fn normalize_segment(geometry: &Segment, base: &mut Option<Segment>, angle: f64) {
    if angle == 0.0 {
        *base = None;
    } else if base.is_none() {
        *base = Some(geometry.rotated(-angle));
    }
}
