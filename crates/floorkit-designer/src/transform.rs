//! Pure element transforms used by the editor.
//!
//! Rotation is always absolute and computed from the element's base
//! geometry, the un-rotated shape kept alongside the current one. Resizing
//! works on the base geometry too, so a later rotation starts from the
//! resized shape.

use floorkit_core::{Element, ElementKind, Polygon, Scale, Segment};

use crate::error::{DesignerError, Result};

/// A dimension the edit panel can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Segment length of walls, doors and windows.
    Length,
    /// Bounding-box width of a zone.
    Width,
    /// Bounding-box height of a zone.
    Height,
    /// Wall thickness.
    Thickness,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
            Self::Thickness => "thickness",
        }
    }
}

/// Current measurements of an element, in meters and degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurements {
    pub length_m: Option<f64>,
    pub width_m: Option<f64>,
    pub height_m: Option<f64>,
    pub thickness_m: Option<f64>,
    pub rotation_deg: f64,
}

/// Reads the panel values of an element.
///
/// Zone width and height are taken from the base geometry, i.e. in the
/// zone's own frame.
pub fn measure(element: &Element, scale: &Scale) -> Measurements {
    let mut m = Measurements {
        rotation_deg: element.rotation(),
        ..Measurements::default()
    };
    match element {
        Element::Wall(w) => {
            m.length_m = Some(scale.pixels_to_meters(w.geometry.length()));
            m.thickness_m = Some(scale.pixels_to_meters(w.thickness_px(scale)));
        }
        Element::Door(_) | Element::Window(_) => {
            m.length_m = element
                .segment()
                .map(|s| scale.pixels_to_meters(s.length()));
        }
        Element::Zone(z) => {
            let base = z.base_geometry.as_ref().unwrap_or(&z.geometry);
            if let Some(b) = base.bounds() {
                m.width_m = Some(scale.pixels_to_meters(b.width()));
                m.height_m = Some(scale.pixels_to_meters(b.height()));
            }
        }
        Element::Label(_) => {}
    }
    m
}

/// Returns a copy rotated to the absolute angle `angle_deg`.
///
/// The result depends only on the base geometry and the angle, never on
/// the angle the element had before.
pub fn rotate_to(element: &Element, angle_deg: f64) -> Result<Element> {
    let mut out = element.clone();
    out.normalize();
    let keep_base = angle_deg != 0.0;

    match &mut out {
        Element::Wall(w) => {
            let base = w.base_geometry.unwrap_or(w.geometry);
            apply_segment_rotation(
                &mut w.geometry,
                &mut w.base_geometry,
                &mut w.rotation,
                base,
                angle_deg,
                keep_base,
            );
        }
        Element::Door(d) => {
            let base = d.base_geometry.unwrap_or(d.geometry);
            apply_segment_rotation(
                &mut d.geometry,
                &mut d.base_geometry,
                &mut d.rotation,
                base,
                angle_deg,
                keep_base,
            );
        }
        Element::Window(w) => {
            let base = w.base_geometry.unwrap_or(w.geometry);
            apply_segment_rotation(
                &mut w.geometry,
                &mut w.base_geometry,
                &mut w.rotation,
                base,
                angle_deg,
                keep_base,
            );
        }
        Element::Zone(z) => {
            let base = z.base_geometry.take().unwrap_or_else(|| z.geometry.clone());
            z.geometry = base.rotated(angle_deg);
            z.rotation = keep_base.then_some(angle_deg);
            z.base_geometry = keep_base.then_some(base);
        }
        Element::Label(_) => {
            return Err(DesignerError::NotResizable {
                kind: ElementKind::Label,
                dimension: "rotation",
            })
        }
    }
    Ok(out)
}

fn apply_segment_rotation(
    geometry: &mut Segment,
    base_slot: &mut Option<Segment>,
    rotation: &mut Option<f64>,
    base: Segment,
    angle_deg: f64,
    keep_base: bool,
) {
    *geometry = base.rotated(angle_deg);
    *rotation = keep_base.then_some(angle_deg);
    *base_slot = keep_base.then_some(base);
}

/// Returns a copy with one dimension set to `meters`.
///
/// Non-positive or non-finite values leave the element unchanged.
pub fn resize(
    element: &Element,
    dimension: Dimension,
    meters: f64,
    scale: &Scale,
) -> Result<Element> {
    check_resizable(element, dimension)?;
    if !(meters.is_finite() && meters > 0.0) {
        tracing::debug!("Ignoring {} of {} m", dimension.as_str(), meters);
        return Ok(element.clone());
    }

    let target_px = scale.meters_to_pixels(meters);
    let mut out = element.clone();
    out.normalize();
    let angle = out.rotation();

    match (&mut out, dimension) {
        (Element::Wall(w), Dimension::Thickness) => {
            w.thickness = Some(target_px);
        }
        (Element::Wall(w), Dimension::Length) => {
            resize_segment(&mut w.geometry, &mut w.base_geometry, angle, target_px);
        }
        (Element::Door(d), Dimension::Length) => {
            resize_segment(&mut d.geometry, &mut d.base_geometry, angle, target_px);
        }
        (Element::Window(w), Dimension::Length) => {
            resize_segment(&mut w.geometry, &mut w.base_geometry, angle, target_px);
        }
        (Element::Zone(z), Dimension::Width | Dimension::Height) => {
            let base = z.base_geometry.clone().unwrap_or_else(|| z.geometry.clone());
            let Some(bounds) = base.bounds() else {
                return Ok(element.clone());
            };
            let current = if dimension == Dimension::Width {
                bounds.width()
            } else {
                bounds.height()
            };
            if current <= 0.0 {
                return Ok(element.clone());
            }
            let factor = target_px / current;
            let resized: Polygon = if dimension == Dimension::Width {
                base.scaled_x(factor)
            } else {
                base.scaled_y(factor)
            };
            z.geometry = if angle != 0.0 {
                resized.rotated(angle)
            } else {
                resized.clone()
            };
            z.base_geometry = (angle != 0.0).then_some(resized);
        }
        _ => {
            return Err(DesignerError::NotResizable {
                kind: element.kind(),
                dimension: dimension.as_str(),
            })
        }
    }
    Ok(out)
}

fn check_resizable(element: &Element, dimension: Dimension) -> Result<()> {
    let ok = matches!(
        (element.kind(), dimension),
        (ElementKind::Wall, Dimension::Length | Dimension::Thickness)
            | (ElementKind::Door | ElementKind::Window, Dimension::Length)
            | (ElementKind::Zone, Dimension::Width | Dimension::Height)
    );
    if ok {
        Ok(())
    } else {
        Err(DesignerError::NotResizable {
            kind: element.kind(),
            dimension: dimension.as_str(),
        })
    }
}

fn resize_segment(
    geometry: &mut Segment,
    base_slot: &mut Option<Segment>,
    angle: f64,
    target_px: f64,
) {
    let base = base_slot.unwrap_or(*geometry);
    let current = base.length();
    if current == 0.0 {
        tracing::debug!("Cannot resize a zero-length segment");
        return;
    }
    let resized = base.scaled_about_center(target_px / current);
    if angle != 0.0 {
        *geometry = resized.rotated(angle);
        *base_slot = Some(resized);
    } else {
        *geometry = resized;
        *base_slot = None;
    }
}

/// Copy of `element` under `new_id`, moved by `offset` on both axes.
pub fn offset_copy(element: &Element, new_id: impl Into<String>, offset: f64) -> Element {
    let mut copy = element.translated(offset, offset);
    copy.set_id(new_id);
    copy
}
