//! Element factory behind the editor's tool palette.
//!
//! New elements are laid out horizontally from a fixed origin; the user
//! drags them into place afterwards.

use floorkit_core::{
    Door, Element, ElementId, ElementKind, Label, PointGeometry, Polygon, Role, Segment, Wall,
    Window, Zone, ZoneType, STANDARD_WINDOW,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::options::EditorOptions;

const WALL_LENGTH: f64 = 200.0;
const DOOR_LENGTH: f64 = 80.0;
const WINDOW_LENGTH: f64 = 120.0;
const ZONE_SIZE: f64 = 200.0;
const PARTITION_THICKNESS_M: f64 = 0.11;
const LOAD_BEARING_THICKNESS_M: f64 = 0.22;
const DEFAULT_SILL_HEIGHT_M: f64 = 0.9;

/// Fresh element id of the form `<kind>_<uuid>`.
pub fn new_element_id(kind: ElementKind) -> ElementId {
    format!("{}_{}", kind, Uuid::new_v4())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallTool {
    LoadBearing,
    Partition,
    Exterior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorTool {
    Single,
    Double,
    Sliding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowTool {
    Standard,
    Panoramic,
    Attic,
}

/// A tool of the palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "tool", rename_all = "snake_case")]
pub enum Tool {
    Wall(WallTool),
    Door(DoorTool),
    Window(WindowTool),
    Zone(ZoneType),
    Label(String),
}

/// Creates elements with default geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFactory {
    px_per_meter: f64,
    origin: (f64, f64),
}

impl ElementFactory {
    pub fn new(px_per_meter: f64, origin: (f64, f64)) -> Self {
        Self {
            px_per_meter,
            origin,
        }
    }

    pub fn from_options(options: &EditorOptions) -> Self {
        Self::new(options.factory_px_per_meter, options.factory_origin)
    }

    pub fn create(&self, tool: &Tool) -> Element {
        match tool {
            Tool::Wall(kind) => self.wall(*kind),
            Tool::Door(_) => self.door(),
            Tool::Window(_) => self.window(),
            Tool::Zone(zone_type) => self.zone(zone_type.clone()),
            Tool::Label(text) => self.label(text),
        }
    }

    /// Partitions are 0.11 m thick; load-bearing and exterior walls 0.22 m.
    pub fn wall(&self, kind: WallTool) -> Element {
        let (load_bearing, thickness_m) = match kind {
            WallTool::Partition => (false, PARTITION_THICKNESS_M),
            WallTool::LoadBearing | WallTool::Exterior => (true, LOAD_BEARING_THICKNESS_M),
        };
        Element::Wall(Wall {
            id: new_element_id(ElementKind::Wall),
            role: Role::New,
            load_bearing: Some(load_bearing),
            thickness: Some(thickness_m * self.px_per_meter),
            geometry: self.horizontal(WALL_LENGTH),
            rotation: None,
            base_geometry: None,
            style: None,
        })
    }

    pub fn door(&self) -> Element {
        Element::Door(Door {
            id: new_element_id(ElementKind::Door),
            role: Role::New,
            geometry: self.horizontal(DOOR_LENGTH),
            rotation: None,
            base_geometry: None,
        })
    }

    pub fn window(&self) -> Element {
        Element::Window(Window {
            id: new_element_id(ElementKind::Window),
            role: Role::New,
            window_type: STANDARD_WINDOW.to_string(),
            sill_height_m: DEFAULT_SILL_HEIGHT_M,
            geometry: self.horizontal(WINDOW_LENGTH),
            rotation: None,
            base_geometry: None,
        })
    }

    pub fn zone(&self, zone_type: ZoneType) -> Element {
        let (x, y) = self.origin;
        Element::Zone(Zone {
            id: new_element_id(ElementKind::Zone),
            zone_type,
            related_to: Vec::new(),
            geometry: Polygon::new(vec![
                x,
                y,
                x + ZONE_SIZE,
                y,
                x + ZONE_SIZE,
                y + ZONE_SIZE,
                x,
                y + ZONE_SIZE,
            ]),
            rotation: None,
            base_geometry: None,
            style: None,
        })
    }

    pub fn label(&self, text: &str) -> Element {
        Element::Label(Label {
            id: new_element_id(ElementKind::Label),
            text: text.to_string(),
            geometry: PointGeometry::new(self.origin.0, self.origin.1),
        })
    }

    fn horizontal(&self, length: f64) -> Segment {
        let (x, y) = self.origin;
        Segment::new(x, y, x + length, y)
    }
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::from_options(&EditorOptions::default())
    }
}
