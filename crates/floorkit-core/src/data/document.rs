//! The plan document: metadata plus the ordered element list.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use super::element::{Element, ElementKind, Wall, Zone};
use crate::error::{PlanError, Result};
use crate::units::{Scale, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMeta {
    pub px_per_meter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundMeta {
    pub file_id: String,
    /// 0 to 1
    pub opacity: f64,
}

/// Canvas description of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_height_m: Option<f64>,
}

impl Default for PlanMeta {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            unit: Unit::Px,
            scale: None,
            background: None,
            ceiling_height_m: None,
        }
    }
}

impl PlanMeta {
    pub fn with_scale(mut self, px_per_meter: f64) -> Self {
        self.scale = Some(ScaleMeta { px_per_meter });
        self
    }

    pub fn px_per_meter(&self) -> Option<f64> {
        self.scale.map(|s| s.px_per_meter)
    }
}

/// Root aggregate of a floor plan.
///
/// Elements are kept in document order; later elements draw on top and win
/// hit-test ties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    pub meta: PlanMeta,
    #[serde(default, deserialize_with = "deserialize_elements_lenient")]
    pub elements: Vec<Element>,
}

impl PlanDocument {
    pub fn new(meta: PlanMeta) -> Self {
        Self {
            meta,
            elements: Vec::new(),
        }
    }

    /// Parses a document from JSON and normalizes it.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: PlanDocument = serde_json::from_str(json)?;
        doc.normalize();
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Geometry scale, 1 px/m when the plan has none.
    pub fn scale(&self) -> Scale {
        Scale::from_optional(self.meta.px_per_meter())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Removes an element by id, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Replaces the element with the same id in place, keeping its position.
    pub fn replace(&mut self, element: Element) -> std::result::Result<(), PlanError> {
        let index = self
            .index_of(element.id())
            .ok_or_else(|| PlanError::ElementNotFound {
                id: element.id().to_string(),
            })?;
        self.elements[index] = element;
        Ok(())
    }

    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.elements.iter().filter_map(|e| match e {
            Element::Wall(w) => Some(w),
            _ => None,
        })
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.elements.iter().filter_map(|e| match e {
            Element::Zone(z) => Some(z),
            _ => None,
        })
    }

    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    /// Fills in missing base geometry of rotated elements.
    pub fn normalize(&mut self) {
        for element in &mut self.elements {
            element.normalize();
        }
    }

    /// Checks the document invariants, returning the first violation.
    pub fn validate(&self) -> std::result::Result<(), PlanError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Collects every invariant violation in document order.
    pub fn validation_errors(&self) -> Vec<PlanError> {
        let mut errors = Vec::new();

        if let Some(px_per_meter) = self.meta.px_per_meter() {
            if !(px_per_meter.is_finite() && px_per_meter > 0.0) {
                errors.push(PlanError::InvalidScale { px_per_meter });
            }
        }

        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id()) {
                errors.push(PlanError::DuplicateId {
                    id: element.id().to_string(),
                });
            }

            match element {
                Element::Wall(w) => {
                    if let Some(thickness) = w.thickness.filter(|t| *t <= 0.0) {
                        errors.push(PlanError::InvalidThickness {
                            id: w.id.clone(),
                            thickness,
                        });
                    }
                }
                Element::Zone(z) if !z.geometry.is_valid() => {
                    errors.push(PlanError::InvalidPolygon {
                        id: z.id.clone(),
                        len: z.geometry.points.len(),
                    });
                }
                _ => {}
            }
        }

        errors
    }
}

/// Parses each element on its own and drops the ones that do not fit any
/// known kind.
pub(crate) fn deserialize_elements_lenient<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut elements = Vec::with_capacity(raw.len());
    for value in raw {
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<no id>")
            .to_string();
        match serde_json::from_value::<Element>(value) {
            Ok(element) => elements.push(element),
            Err(err) => tracing::warn!("Skipping element {}: {}", id, err),
        }
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::{Polygon, Segment};
    use crate::data::element::{Role, ZoneType};

    fn wall(id: &str, thickness: Option<f64>) -> Element {
        Element::Wall(Wall {
            id: id.to_string(),
            role: Role::Existing,
            load_bearing: Some(true),
            thickness,
            geometry: Segment::new(0.0, 0.0, 100.0, 0.0),
            rotation: None,
            base_geometry: None,
            style: None,
        })
    }

    #[test]
    fn test_scale_fallback() {
        let doc = PlanDocument::default();
        assert_eq!(doc.scale().px_per_meter(), 1.0);

        let doc = PlanDocument::new(PlanMeta::default().with_scale(50.0));
        assert_eq!(doc.scale().px_per_meter(), 50.0);
    }

    #[test]
    fn test_validate_reports_violations() {
        let mut doc = PlanDocument::new(PlanMeta::default().with_scale(0.0));
        doc.push(wall("w1", Some(20.0)));
        doc.push(wall("w1", Some(0.0)));
        doc.push(Element::Zone(Zone {
            id: "z1".to_string(),
            zone_type: ZoneType::Kitchen,
            related_to: vec![],
            geometry: Polygon::new(vec![0.0, 0.0, 1.0, 1.0]),
            rotation: None,
            base_geometry: None,
            style: None,
        }));

        let errors = doc.validation_errors();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], PlanError::InvalidScale { .. }));
        assert!(matches!(errors[1], PlanError::DuplicateId { .. }));
        assert!(matches!(errors[2], PlanError::InvalidThickness { .. }));
        assert!(matches!(errors[3], PlanError::InvalidPolygon { len: 4, .. }));
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_missing_thickness_is_valid() {
        let mut doc = PlanDocument::default();
        doc.push(wall("w1", None));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut doc = PlanDocument::default();
        doc.push(wall("a", Some(10.0)));
        doc.push(wall("b", Some(10.0)));
        doc.replace(wall("a", Some(30.0))).unwrap();
        assert_eq!(doc.index_of("a"), Some(0));
        assert!(doc.replace(wall("missing", None)).is_err());
    }

    #[test]
    fn test_unknown_element_kind_is_skipped() {
        let json = r#"{
            "meta": {"width": 100, "height": 100, "unit": "px"},
            "elements": [
                {"id": "s1", "type": "stairs", "geometry": {"kind": "point", "x": 0, "y": 0}},
                {"id": "l1", "type": "label", "text": "Hall",
                 "geometry": {"kind": "point", "x": 5, "y": 6}}
            ]
        }"#;
        let doc = PlanDocument::from_json(json).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.elements[0].id(), "l1");
    }
}
