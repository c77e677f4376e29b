//! Plan loading from JSON.
//!
//! Accepts either a bare plan document or a stored plan version.

use std::path::Path;

use super::document::PlanDocument;
use super::object3d::Object3D;
use super::version::PlanVersion;
use crate::error::{Error, Result};

/// A plan as read from disk or from the host application.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlan {
    pub document: PlanDocument,
    pub objects: Vec<Object3D>,
    /// Envelope fields when the input was a plan version.
    pub version: Option<PlanVersion>,
}

/// Parses a plan from a JSON string.
pub fn load_plan_str(json: &str) -> Result<LoadedPlan> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let loaded = if value.get("plan").is_some() && value.get("versionType").is_some() {
        let version: PlanVersion = serde_json::from_value(value)?;
        let (document, objects) = version.clone().into_parts();
        LoadedPlan {
            document,
            objects,
            version: Some(version),
        }
    } else if value.get("meta").is_some() {
        let mut document: PlanDocument = serde_json::from_value(value)?;
        document.normalize();
        LoadedPlan {
            document,
            objects: Vec::new(),
            version: None,
        }
    } else {
        return Err(Error::other(
            "Unrecognized plan format: expected a plan document or a plan version",
        ));
    };

    tracing::info!(
        "Loaded plan with {} elements and {} objects",
        loaded.document.len(),
        loaded.objects.len()
    );
    Ok(loaded)
}

/// Reads and parses a plan file.
pub fn load_plan_file(path: impl AsRef<Path>) -> Result<LoadedPlan> {
    let path = path.as_ref();
    tracing::debug!("Reading plan from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    load_plan_str(&content)
}

/// Parses a standalone furniture list.
pub fn load_objects_str(json: &str) -> Result<Vec<Object3D>> {
    Ok(serde_json::from_str(json)?)
}
