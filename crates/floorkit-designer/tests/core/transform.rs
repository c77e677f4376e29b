use floorkit_core::{Element, Role, Scale, Segment, Wall};
use floorkit_designer::transform::{resize, rotate_to, Dimension};
use proptest::prelude::*;

fn wall(points: [f64; 4]) -> Element {
    Element::Wall(Wall {
        id: "w".into(),
        role: Role::Existing,
        load_bearing: None,
        thickness: Some(10.0),
        geometry: Segment { points },
        rotation: None,
        base_geometry: None,
        style: None,
    })
}

fn points(element: &Element) -> [f64; 4] {
    element.segment().map(|s| s.points).unwrap_or_default()
}

fn close(a: [f64; 4], b: [f64; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
}

proptest! {
    #[test]
    fn test_rotation_is_absolute(first in -360.0f64..360.0, second in -360.0f64..360.0) {
        let original = wall([0.0, 0.0, 100.0, 40.0]);
        let direct = rotate_to(&original, second).unwrap();
        let chained = rotate_to(&rotate_to(&original, first).unwrap(), second).unwrap();
        prop_assert!(close(points(&direct), points(&chained)));
    }
}

#[test]
fn test_rotate_back_to_zero_restores_geometry() {
    let original = wall([10.0, 20.0, 110.0, 20.0]);
    let turned = rotate_to(&original, 37.0).unwrap();
    let back = rotate_to(&turned, 0.0).unwrap();
    assert!(close(points(&back), [10.0, 20.0, 110.0, 20.0]));
    assert_eq!(back.rotation(), 0.0);
}

#[test]
fn test_resize_then_rotate() {
    let scale = Scale::default();
    let original = wall([0.0, 0.0, 100.0, 0.0]);
    let longer = resize(&original, Dimension::Length, 200.0, &scale).unwrap();
    assert!(close(points(&longer), [-50.0, 0.0, 150.0, 0.0]));

    let turned = rotate_to(&longer, 90.0).unwrap();
    let segment = turned.segment().copied().unwrap();
    assert!((segment.length() - 200.0).abs() < 1e-6);
    assert!((segment.midpoint().x - 50.0).abs() < 1e-6);
    assert!((segment.start().x - 50.0).abs() < 1e-6);
    assert!((segment.end().x - 50.0).abs() < 1e-6);
}

#[test]
fn test_resize_rotated_keeps_angle() {
    let scale = Scale::new(10.0);
    let turned = rotate_to(&wall([0.0, 0.0, 100.0, 0.0]), 45.0).unwrap();
    let resized = resize(&turned, Dimension::Length, 20.0, &scale).unwrap();
    assert_eq!(resized.rotation(), 45.0);
    let segment = resized.segment().copied().unwrap();
    assert!((segment.length() - 200.0).abs() < 1e-6);
}
