//! Stored plan versions.
//!
//! The host application keeps plans wrapped in a version envelope that
//! records the owning order and whether the plan is the original survey or
//! a modified design.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::document::{deserialize_elements_lenient, PlanDocument, PlanMeta};
use super::element::Element;
use super::object3d::Object3D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionType {
    Original,
    Modified,
}

/// Plan payload of a version: the document plus its furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionPlan {
    pub meta: PlanMeta,
    #[serde(default, deserialize_with = "deserialize_elements_lenient")]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects3d: Vec<Object3D>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanVersion {
    pub id: Uuid,
    pub order_id: Uuid,
    pub version_type: VersionType,
    pub plan: VersionPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl PlanVersion {
    /// Wraps a document in a fresh version envelope.
    pub fn new(order_id: Uuid, version_type: VersionType, document: PlanDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            version_type,
            plan: VersionPlan {
                meta: document.meta,
                elements: document.elements,
                objects3d: Vec::new(),
            },
            comment: None,
            created_by_id: None,
            created_at: Utc::now(),
        }
    }

    /// Splits the envelope into a normalized document and its furniture.
    pub fn into_parts(self) -> (PlanDocument, Vec<Object3D>) {
        let mut document = PlanDocument {
            meta: self.plan.meta,
            elements: self.plan.elements,
        };
        document.normalize();
        (document, self.plan.objects3d)
    }
}

/// Accepts RFC 3339 timestamps as well as naive ISO ones, taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
