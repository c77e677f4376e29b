//! 2D scene builder.
//!
//! Turns plan elements into flat drawing primitives in plan pixels. Each
//! [`SceneObject2D`] keeps the id of the element it was built from so that
//! picks resolve back to the model.

use std::f64::consts::FRAC_PI_2;

use floorkit_core::polygon::distance_to_segment;
use floorkit_core::{
    Bounds, Color, Door, Element, ElementId, ElementKind, Label, Palette, PlanDocument, Point2,
    Scale, Segment, Wall, Window, Zone,
};
use smallvec::SmallVec;

use crate::options::{HitTolerances, SceneOptions};

/// One drawable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive2D {
    /// Filled quadrilateral with an outline.
    Quad {
        corners: [Point2; 4],
        fill: Color,
        stroke: Color,
    },
    /// Filled polygon with an outline.
    Fill {
        points: Vec<Point2>,
        fill: Color,
        stroke: Color,
    },
    Line {
        from: Point2,
        to: Point2,
        color: Color,
        width: f64,
        dashed: bool,
    },
    Polyline {
        points: Vec<Point2>,
        color: Color,
        width: f64,
        dashed: bool,
        closed: bool,
    },
    /// Text centered on `center` over a filled box.
    TextBox {
        center: Point2,
        text: String,
        width: f64,
        height: f64,
        font_size: f64,
        background: Color,
        border: Color,
        color: Color,
    },
}

impl Primitive2D {
    /// Whether `point` falls on this primitive.
    ///
    /// Filled shapes test their area. Lines and polylines test the distance
    /// to their segments against `line_tolerance`.
    pub fn contains(&self, point: Point2, line_tolerance: f64) -> bool {
        match self {
            Primitive2D::Quad { corners, .. } => point_in_points(point, corners),
            Primitive2D::Fill { points, .. } => point_in_points(point, points),
            Primitive2D::Line { from, to, .. } => {
                distance_to_segment(point, *from, *to) <= line_tolerance
            }
            Primitive2D::Polyline { points, .. } => points
                .windows(2)
                .any(|w| distance_to_segment(point, w[0], w[1]) <= line_tolerance),
            Primitive2D::TextBox {
                center,
                width,
                height,
                ..
            } => text_box_bounds(*center, *width, *height).contains(point),
        }
    }
}

/// Primitives built for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject2D {
    pub element_id: ElementId,
    pub kind: ElementKind,
    pub primitives: SmallVec<[Primitive2D; 4]>,
}

/// Draw rank of an element kind; lower draws first.
pub fn draw_rank(kind: ElementKind) -> u8 {
    match kind {
        ElementKind::Zone => 0,
        ElementKind::Wall => 1,
        ElementKind::Door => 2,
        ElementKind::Window => 3,
        ElementKind::Label => 4,
    }
}

/// Builds the primitives for a single element.
///
/// Returns `None` for geometry that cannot be drawn, such as zero-length
/// segments or polygons with fewer than three vertices.
pub fn build_element(
    element: &Element,
    scale: &Scale,
    options: &SceneOptions,
    palette: &Palette,
) -> Option<SceneObject2D> {
    let primitives = match element {
        Element::Wall(w) => build_wall(w, scale, palette),
        Element::Zone(z) => build_zone(z, palette),
        Element::Door(d) => build_door(d, options, palette),
        Element::Window(w) => build_window(w, options, palette),
        Element::Label(l) => Some(build_label(l, options, palette)),
    };

    match primitives {
        Some(primitives) => Some(SceneObject2D {
            element_id: element.id().to_string(),
            kind: element.kind(),
            primitives,
        }),
        None => {
            tracing::debug!("Skipping {} {}: degenerate geometry", element.kind(), element.id());
            None
        }
    }
}

/// Builds the whole 2D scene in draw order.
///
/// Zones come first, then walls, doors, windows and labels. Document order
/// is kept within a kind.
pub fn build_scene(
    doc: &PlanDocument,
    options: &SceneOptions,
    palette: &Palette,
) -> Vec<SceneObject2D> {
    let scale = doc.scale();
    let mut scene: Vec<SceneObject2D> = doc
        .elements
        .iter()
        .filter_map(|e| build_element(e, &scale, options, palette))
        .collect();
    scene.sort_by_key(|o| draw_rank(o.kind));
    scene
}

fn build_wall(wall: &Wall, scale: &Scale, palette: &Palette) -> Option<SmallVec<[Primitive2D; 4]>> {
    let corners = wall.geometry.offset_quad(wall.thickness_px(scale))?;
    let mut out = SmallVec::new();
    out.push(Primitive2D::Quad {
        corners,
        fill: palette.wall_color(wall),
        stroke: palette.stroke,
    });
    Some(out)
}

fn build_zone(zone: &Zone, palette: &Palette) -> Option<SmallVec<[Primitive2D; 4]>> {
    if !zone.geometry.is_valid() {
        return None;
    }
    let mut out = SmallVec::new();
    out.push(Primitive2D::Fill {
        points: zone.geometry.vertices().collect(),
        fill: palette.zone_color(&zone.zone_type),
        stroke: palette.stroke,
    });
    Some(out)
}

fn build_door(
    door: &Door,
    options: &SceneOptions,
    palette: &Palette,
) -> Option<SmallVec<[Primitive2D; 4]>> {
    let seg = &door.geometry;
    if seg.is_degenerate() {
        return None;
    }
    let color = palette.door_color(door.role);
    let hinge = seg.start();
    let length = seg.length();
    let angle = seg.angle();
    let leaf_angle = angle + FRAC_PI_2;
    let leaf_tip = polar(hinge, leaf_angle, length);

    let segments = options.door_arc_segments.max(1);
    let arc = (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            polar(hinge, leaf_angle + (angle - leaf_angle) * t, length)
        })
        .collect();

    let mut out = SmallVec::new();
    out.push(line(hinge, seg.end(), color, false));
    out.push(line(hinge, leaf_tip, color, false));
    out.push(Primitive2D::Polyline {
        points: arc,
        color,
        width: 1.0,
        dashed: true,
        closed: false,
    });
    out.push(line(leaf_tip, seg.end(), color, true));
    Some(out)
}

fn build_window(
    window: &Window,
    options: &SceneOptions,
    palette: &Palette,
) -> Option<SmallVec<[Primitive2D; 4]>> {
    let seg = &window.geometry;
    let (nx, ny) = seg.unit_normal()?;
    let color = palette.window_color(window.role);
    let count = options.window_line_count.max(1);
    let spacing = options.window_total_width / count as f64;
    let middle = (count as f64 - 1.0) / 2.0;

    let out = (0..count)
        .map(|i| {
            let offset = (i as f64 - middle) * spacing;
            let (ox, oy) = (nx * offset, ny * offset);
            line(seg.start().offset(ox, oy), seg.end().offset(ox, oy), color, false)
        })
        .collect();
    Some(out)
}

fn build_label(
    label: &Label,
    options: &SceneOptions,
    palette: &Palette,
) -> SmallVec<[Primitive2D; 4]> {
    let (width, height) = options.label_box_size(&label.text);
    let mut out = SmallVec::new();
    out.push(Primitive2D::TextBox {
        center: label.geometry.point(),
        text: label.text.clone(),
        width,
        height,
        font_size: options.label_font_size,
        background: palette.label_bg,
        border: palette.stroke,
        color: palette.label_text,
    });
    out
}

/// Margin of the door selection rectangle.
const DOOR_SELECTION_MARGIN: f64 = 10.0;
/// Margin of the window selection rectangle.
const WINDOW_SELECTION_MARGIN: f64 = 12.0;
/// Growth of the label box when selected.
const LABEL_SELECTION_MARGIN: f64 = 8.0;

/// Dashed outline drawn around the selected element.
///
/// Walls and zones reuse their own outline. Doors and windows get a
/// rectangle around the segment. Labels get their box grown on every side.
pub fn selection_outline(
    element: &Element,
    scale: &Scale,
    options: &SceneOptions,
    palette: &Palette,
) -> Option<Primitive2D> {
    let points: Vec<Point2> = match element {
        Element::Wall(w) => w.geometry.offset_quad(w.thickness_px(scale))?.to_vec(),
        Element::Zone(z) if z.geometry.is_valid() => z.geometry.vertices().collect(),
        Element::Zone(_) => return None,
        Element::Door(d) => margin_rect(&d.geometry, DOOR_SELECTION_MARGIN)?,
        Element::Window(w) => margin_rect(&w.geometry, WINDOW_SELECTION_MARGIN)?,
        Element::Label(l) => {
            let (width, height) = options.label_box_size(&l.text);
            let b = text_box_bounds(l.geometry.point(), width, height)
                .expanded(LABEL_SELECTION_MARGIN);
            vec![
                Point2::new(b.min_x, b.min_y),
                Point2::new(b.max_x, b.min_y),
                Point2::new(b.max_x, b.max_y),
                Point2::new(b.min_x, b.max_y),
            ]
        }
    };
    Some(Primitive2D::Polyline {
        points,
        color: palette.selection,
        width: options.selection_line_width,
        dashed: true,
        closed: true,
    })
}

/// Renderer-side pick over built scene objects.
///
/// Objects are tested in reverse draw order; the first hit wins.
pub fn pick<'a>(
    scene: &'a [SceneObject2D],
    point: Point2,
    tolerances: &HitTolerances,
) -> Option<&'a str> {
    scene
        .iter()
        .rev()
        .find(|o| object_contains(o, point, tolerances))
        .map(|o| o.element_id.as_str())
}

/// Whether any primitive of `object` lies under `point`.
///
/// Door glyphs use the door distance, every other line the window distance.
pub fn object_contains(object: &SceneObject2D, point: Point2, tolerances: &HitTolerances) -> bool {
    let tolerance = match object.kind {
        ElementKind::Door => tolerances.door_distance,
        _ => tolerances.window_distance,
    };
    object.primitives.iter().any(|p| p.contains(point, tolerance))
}

fn margin_rect(seg: &Segment, margin: f64) -> Option<Vec<Point2>> {
    seg.offset_quad(margin * 2.0).map(|q| q.to_vec())
}

fn text_box_bounds(center: Point2, width: f64, height: f64) -> Bounds {
    Bounds::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        center.x + width / 2.0,
        center.y + height / 2.0,
    )
}

fn polar(origin: Point2, angle: f64, radius: f64) -> Point2 {
    origin.offset(angle.cos() * radius, angle.sin() * radius)
}

fn line(from: Point2, to: Point2, color: Color, dashed: bool) -> Primitive2D {
    Primitive2D::Line {
        from,
        to,
        color,
        width: 1.0,
        dashed,
    }
}

fn point_in_points(point: Point2, vertices: &[Point2]) -> bool {
    let flat: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();
    floorkit_core::polygon::point_in_polygon(point, &flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorkit_core::{PointGeometry, Role};

    fn door() -> Element {
        Element::Door(Door {
            id: "d".into(),
            role: Role::New,
            geometry: Segment::new(0.0, 0.0, 80.0, 0.0),
            rotation: None,
            base_geometry: None,
        })
    }

    #[test]
    fn test_door_glyph() {
        let obj = build_element(
            &door(),
            &Scale::default(),
            &SceneOptions::default(),
            &Palette::default(),
        )
        .unwrap();
        assert_eq!(obj.primitives.len(), 4);
        let Primitive2D::Line { to: leaf_tip, .. } = &obj.primitives[1] else {
            panic!("expected leaf line");
        };
        assert!((leaf_tip.x).abs() < 1e-9);
        assert!((leaf_tip.y - 80.0).abs() < 1e-9);
        let Primitive2D::Polyline { points, dashed, .. } = &obj.primitives[2] else {
            panic!("expected arc");
        };
        assert_eq!(points.len(), 17);
        assert!(dashed);
        let last = points[16];
        assert!((last.x - 80.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    }

    #[test]
    fn test_window_hairlines() {
        let window = Element::Window(Window {
            id: "w".into(),
            role: Role::Existing,
            window_type: "STANDARD".into(),
            sill_height_m: 0.9,
            geometry: Segment::new(0.0, 0.0, 100.0, 0.0),
            rotation: None,
            base_geometry: None,
        });
        let obj = build_element(
            &window,
            &Scale::default(),
            &SceneOptions::default(),
            &Palette::default(),
        )
        .unwrap();
        let ys: Vec<f64> = obj
            .primitives
            .iter()
            .map(|p| match p {
                Primitive2D::Line { from, .. } => from.y,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(ys, vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_zero_length_wall_skipped() {
        let wall = Element::Wall(Wall {
            id: "w".into(),
            role: Role::Existing,
            load_bearing: None,
            thickness: Some(10.0),
            geometry: Segment::new(5.0, 5.0, 5.0, 5.0),
            rotation: None,
            base_geometry: None,
            style: None,
        });
        let scale = Scale::default();
        assert!(
            build_element(&wall, &scale, &SceneOptions::default(), &Palette::default()).is_none()
        );
    }

    #[test]
    fn test_label_selection_grows_box() {
        let label = Element::Label(Label {
            id: "l".into(),
            text: "ab".into(),
            geometry: PointGeometry::new(0.0, 0.0),
        });
        let outline = selection_outline(
            &label,
            &Scale::default(),
            &SceneOptions::default(),
            &Palette::default(),
        )
        .unwrap();
        let Primitive2D::Polyline { points, closed, .. } = outline else {
            panic!("expected polyline");
        };
        assert!(closed);
        let text_width = 2.0 * 14.0 * 0.6;
        assert!((points[0].x + (text_width + 16.0) / 2.0 + 8.0).abs() < 1e-9);
        assert!((points[0].y + 18.0 + 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_pick_reverse_order() {
        let opts = SceneOptions::default();
        let palette = Palette::default();
        let scale = Scale::default();
        let scene = vec![
            build_element(&door(), &scale, &opts, &palette).unwrap(),
            build_element(
                &Element::Label(Label {
                    id: "l".into(),
                    text: "Hall".into(),
                    geometry: PointGeometry::new(40.0, 0.0),
                }),
                &scale,
                &opts,
                &palette,
            )
            .unwrap(),
        ];
        let tol = HitTolerances::default();
        assert_eq!(pick(&scene, Point2::new(40.0, 2.0), &tol), Some("l"));
        assert_eq!(pick(&scene, Point2::new(78.0, 6.0), &tol), Some("d"));
        assert_eq!(pick(&scene, Point2::new(500.0, 500.0), &tol), None);
    }
}
