//! Plan data model
//!
//! Elements, geometry kinds, furniture placements and the plan document
//! together with its version envelope and loader.

pub mod document;
pub mod element;
pub mod geometry;
pub mod loader;
pub mod object3d;
pub mod version;

pub use document::{BackgroundMeta, PlanDocument, PlanMeta, ScaleMeta};
pub use element::{
    Door, Element, ElementId, ElementKind, ElementStyle, Label, Role, Wall, Window, Zone,
    ZoneCategory, ZoneType, STANDARD_WINDOW,
};
pub use geometry::{Point2, PointGeometry, Polygon, Segment};
pub use loader::{load_objects_str, load_plan_file, load_plan_str, LoadedPlan};
pub use object3d::{EulerRotation, Object3D, Object3DType, Vec3};
pub use version::{PlanVersion, VersionPlan, VersionType};
