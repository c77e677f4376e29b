use floorkit_core::units::{meters_to_pixels, pixels_to_meters, Scale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_meter_pixel_round_trip(m in 0.0f64..10_000.0, ppm in 0.01f64..1_000.0) {
        let back = pixels_to_meters(meters_to_pixels(m, ppm), ppm);
        prop_assert!((back - m).abs() <= 1e-9 * m.max(1.0));
    }

    #[test]
    fn test_plan_world_round_trip(
        x in -5_000.0f64..5_000.0,
        y in -5_000.0f64..5_000.0,
        ppm in 0.5f64..200.0,
    ) {
        let scale = Scale::new(ppm);
        let (wx, _, wz) = scale.plan_to_world(x, y, 0.0);
        let (px, py) = scale.world_to_plan(wx, wz);
        prop_assert!((px - x).abs() < 1e-6);
        prop_assert!((py - y).abs() < 1e-6);
    }
}

#[test]
fn test_plan_y_maps_to_negative_world_z() {
    let scale = Scale::new(10.0);
    let (_, up, z) = scale.plan_to_world(0.0, 30.0, 1.7);
    assert_eq!(up, 1.7);
    assert_eq!(z, -3.0);
}
