use std::f64::consts::PI;

use floorkit_core::{Element, PlanDocument, PlanMeta, Polygon, Role, Segment, Wall, Zone, ZoneType};
use floorkit_designer::{spawn_point, try_safe_position, Scene3D, WalkOptions};
use nalgebra::Point3;

fn zone(id: &str, x: f64, size: f64) -> Element {
    Element::Zone(Zone {
        id: id.into(),
        zone_type: ZoneType::Bedroom,
        related_to: vec![],
        geometry: Polygon::new(vec![x, 0.0, x + size, 0.0, x + size, size, x, size]),
        rotation: None,
        base_geometry: None,
        style: None,
    })
}

#[test]
fn test_wall_collision() {
    let mut doc = PlanDocument::new(PlanMeta::default().with_scale(100.0));
    doc.push(Element::Wall(Wall {
        id: "w".into(),
        role: Role::Existing,
        load_bearing: None,
        thickness: Some(20.0),
        geometry: Segment::new(0.0, 0.0, 500.0, 0.0),
        rotation: None,
        base_geometry: None,
        style: None,
    }));
    let mut scene = Scene3D::default();
    scene.sync(&doc);

    let opts = WalkOptions::default();
    let h = opts.eye_height_m;
    let old = Point3::new(2.5, h, 6.0);

    let rejected = try_safe_position(Point3::new(2.5, h, 0.0), old, scene.walls(), &opts);
    assert_eq!(rejected, old);

    let free = Point3::new(2.5, h, 5.0);
    assert_eq!(try_safe_position(free, old, scene.walls(), &opts), free);
}

#[test]
fn test_spawn_in_largest_zone() {
    let mut doc = PlanDocument::new(PlanMeta::default().with_scale(10.0));
    doc.push(zone("small", 0.0, 100.0));
    doc.push(zone("large", 200.0, 300.0));

    let spawn = spawn_point(&doc, &WalkOptions::default());
    assert_eq!(spawn.zone_index, Some(1));
    assert!((spawn.position.x - 35.0).abs() < 1e-9);
    assert!((spawn.position.y - 1.7).abs() < 1e-9);
    assert!((spawn.position.z - (-15.0 + 0.5)).abs() < 1e-9);
    assert_eq!(spawn.yaw, PI);
}
