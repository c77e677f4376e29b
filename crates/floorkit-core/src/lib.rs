//! # FloorKit Core
//!
//! Core types and utilities for FloorKit.
//! Provides the plan data model, unit and coordinate conversion, polygon
//! math, the color palette and the error types shared by the other crates.

pub mod data;
pub mod error;
pub mod palette;
pub mod polygon;
pub mod units;

pub use data::{
    load_objects_str, load_plan_file, load_plan_str, BackgroundMeta, Door, Element, ElementId,
    ElementKind, ElementStyle, EulerRotation, Label, LoadedPlan, Object3D, Object3DType,
    PlanDocument, PlanMeta, PlanVersion, Point2, PointGeometry, Polygon, Role, ScaleMeta, Segment,
    Vec3, VersionPlan, VersionType, Wall, Window, Zone, ZoneCategory, ZoneType, STANDARD_WINDOW,
};

pub use error::{Error, PlanError, Result};

pub use palette::{Color, Palette, RoleColors};

pub use polygon::Bounds;

pub use units::{Scale, Unit};
