use floorkit_core::{Element, PlanDocument, PlanMeta, Point2, Polygon, Zone, ZoneType};
use floorkit_designer::hit_test::hit_test;
use floorkit_designer::HitTolerances;

fn square(id: &str, x: f64, y: f64, size: f64) -> Element {
    Element::Zone(Zone {
        id: id.into(),
        zone_type: ZoneType::LivingRoom,
        related_to: vec![],
        geometry: Polygon::new(vec![x, y, x + size, y, x + size, y + size, x, y + size]),
        rotation: None,
        base_geometry: None,
        style: None,
    })
}

#[test]
fn test_later_zone_wins_overlap() {
    let mut doc = PlanDocument::new(PlanMeta::default());
    doc.push(square("z1", 0.0, 0.0, 100.0));
    doc.push(square("z2", 50.0, 50.0, 100.0));
    let tol = HitTolerances::default();

    let hit = hit_test(Point2::new(75.0, 75.0), &doc, &tol).map(Element::id);
    assert_eq!(hit, Some("z2"));
    let hit = hit_test(Point2::new(25.0, 25.0), &doc, &tol).map(Element::id);
    assert_eq!(hit, Some("z1"));
    assert!(hit_test(Point2::new(500.0, 500.0), &doc, &tol).is_none());
}
