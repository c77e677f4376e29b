use floorkit_core::polygon::{bounding_box, centroid, rotate_points, signed_area};
use floorkit_core::{Point2, Polygon, Scale};
use proptest::prelude::*;

#[test]
fn test_unit_square_area_in_square_meters() {
    let square = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
    let scale = Scale::new(10.0);
    let area_m2 = scale.area_to_square_meters(signed_area(&square));
    assert!((area_m2 - 1.0).abs() < 1e-12);
}

#[test]
fn test_collinear_centroid_is_vertex_mean() {
    let c = centroid(&[0.0, 0.0, 5.0, 5.0, 10.0, 10.0]);
    assert!((c.x - 5.0).abs() < 1e-9);
    assert!((c.y - 5.0).abs() < 1e-9);
}

#[test]
fn test_bounding_box_of_triangle() {
    let b = bounding_box(&[3.0, 1.0, -2.0, 4.0, 0.0, -6.0]).unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-2.0, -6.0, 3.0, 4.0));
    assert_eq!(b.width(), 5.0);
    assert_eq!(b.height(), 10.0);
}

#[test]
fn test_polygon_contains() {
    let zone = Polygon::new(vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0]);
    assert!(zone.contains(Point2::new(50.0, 50.0)));
    assert!(!zone.contains(Point2::new(150.0, 50.0)));
}

proptest! {
    #[test]
    fn test_rotation_preserves_area(
        angle in -360.0f64..360.0,
        w in 1.0f64..500.0,
        h in 1.0f64..500.0,
    ) {
        let rect = [0.0, 0.0, w, 0.0, w, h, 0.0, h];
        let rotated = rotate_points(&rect, Point2::new(w / 2.0, h / 2.0), angle);
        prop_assert!((signed_area(&rotated) - w * h).abs() < 1e-6 * w * h);
    }

    #[test]
    fn test_rotation_back_restores_points(
        angle in -360.0f64..360.0,
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
    ) {
        let pts = [x, y, x + 40.0, y - 10.0];
        let pivot = Point2::new(x + 20.0, y - 5.0);
        let back = rotate_points(&rotate_points(&pts, pivot, angle), pivot, -angle);
        for (a, b) in back.iter().zip(pts.iter()) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }
}
