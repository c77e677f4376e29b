//! Furniture placements for the 3D view.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::element::ElementId;

/// Plain 3-component vector as stored in plan JSON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }
}

/// Euler angles in radians; missing axes are 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerRotation {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Object3DType {
    Chair,
    Table,
    Bed,
    Window,
    Door,
    Other(String),
}

impl Object3DType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chair => "chair",
            Self::Table => "table",
            Self::Bed => "bed",
            Self::Window => "window",
            Self::Door => "door",
            Self::Other(name) => name,
        }
    }

    /// Size in meters used when an object carries no explicit size.
    pub fn default_scale(&self) -> Vec3 {
        match self {
            Self::Chair => Vec3::splat(0.5),
            Self::Table => Vec3::splat(1.0),
            Self::Bed => Vec3::new(2.0, 0.5, 1.5),
            Self::Window => Vec3::new(1.0, 1.0, 0.1),
            Self::Door => Vec3::new(0.9, 2.1, 0.1),
            Self::Other(_) => Vec3::splat(1.0),
        }
    }
}

impl From<String> for Object3DType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "chair" => Self::Chair,
            "table" => Self::Table,
            "bed" => Self::Bed,
            "window" => Self::Window,
            "door" => Self::Door,
            _ => Self::Other(s),
        }
    }
}

impl From<Object3DType> for String {
    fn from(t: Object3DType) -> Self {
        match t {
            Object3DType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Object3DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of furniture placed in the 3D scene.
///
/// `position.x` and `position.z` are plan pixels, `position.y` is meters
/// above the floor. `size` is in plan pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object3D {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: Object3DType,
    pub position: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<EulerRotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Object3D {
    pub fn new(id: impl Into<ElementId>, kind: Object3DType, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            size: None,
            rotation: None,
            wall_id: None,
            zone_id: None,
            meta: None,
        }
    }
}
