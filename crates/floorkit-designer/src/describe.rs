//! Tooltip text and short labels for plan elements.

use floorkit_core::units::{format_meters, usable_px_per_meter, DISPLAY_PX_PER_METER};
use floorkit_core::{Element, Role, Scale, Segment, Zone};

/// Scale used for descriptions, 40 px/m when the plan has none.
pub fn display_scale(px_per_meter: Option<f64>) -> Scale {
    Scale::new(usable_px_per_meter(px_per_meter).unwrap_or(DISPLAY_PX_PER_METER))
}

/// One-line description of an element, lengths in meters.
///
/// # Examples
///
/// ```
/// use floorkit_core::{Element, Label, PointGeometry};
/// use floorkit_designer::describe::describe;
///
/// let label = Element::Label(Label {
///     id: "l1".into(),
///     text: "Hall".into(),
///     geometry: PointGeometry::new(0.0, 0.0),
/// });
/// assert_eq!(describe(&label, None), "Label: Hall");
/// ```
pub fn describe(element: &Element, px_per_meter: Option<f64>) -> String {
    let scale = display_scale(px_per_meter);
    match element {
        Element::Wall(w) => {
            let mut parts = vec!["Wall".to_string()];
            if w.is_load_bearing() {
                parts.push("load-bearing".into());
            }
            parts.extend(role_suffix(w.role).map(String::from));
            parts.push(format!(
                "Thickness: {}m",
                format_meters(scale.pixels_to_meters(w.thickness_px(&scale)))
            ));
            parts.push(format!("Length: {}m", segment_meters(&w.geometry, &scale)));
            parts.join(" ")
        }
        Element::Zone(z) => format!("Zone: {}", zone_name(z)),
        Element::Door(d) => {
            let mut parts = vec!["Door".to_string()];
            parts.extend(role_suffix(d.role).map(String::from));
            parts.push(format!("Width: {}m", segment_meters(&d.geometry, &scale)));
            parts.join(" ")
        }
        Element::Window(w) => {
            let mut parts = vec!["Window".to_string()];
            parts.extend(role_suffix(w.role).map(String::from));
            parts.push(format!("Width: {}m", segment_meters(&w.geometry, &scale)));
            parts.push(format!("Sill: {}m", w.sill_height_m));
            parts.join(" ")
        }
        Element::Label(l) => format!("Label: {}", l.text),
    }
}

/// Short name shown on chips and in lists.
pub fn short_label(element: &Element) -> String {
    match element {
        Element::Wall(_) => "Wall".into(),
        Element::Zone(z) => z.zone_type.display_name().unwrap_or("Zone").into(),
        Element::Door(_) => "Door".into(),
        Element::Window(_) => "Window".into(),
        Element::Label(l) if l.text.is_empty() => "Label".into(),
        Element::Label(l) => l.text.clone(),
    }
}

fn zone_name(zone: &Zone) -> &str {
    match zone.zone_type.display_name() {
        Some(name) => name,
        None => zone.zone_type.as_str(),
    }
}

fn role_suffix(role: Role) -> Option<&'static str> {
    match role {
        Role::Existing => None,
        Role::New => Some("(new)"),
        Role::Modified => Some("(modified)"),
        Role::ToDelete => Some("(to delete)"),
    }
}

fn segment_meters(segment: &Segment, scale: &Scale) -> String {
    format_meters(scale.pixels_to_meters(segment.length()))
}
