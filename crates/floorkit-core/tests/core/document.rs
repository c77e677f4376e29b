use floorkit_core::{
    load_plan_file, load_plan_str, Element, ElementKind, Object3DType, PlanDocument, Role,
    VersionType, ZoneType,
};
use std::io::Write;

const VERSION_JSON: &str = r##"{
    "id": "ce938abe-4d9a-4f32-bd5a-1ff233537527",
    "orderId": "a4704115-6aea-407a-a6a7-23b0696a6424",
    "versionType": "MODIFIED",
    "createdAt": "2025-11-29T21:40:51.812413",
    "plan": {
        "meta": {
            "width": 1000, "height": 700, "unit": "px",
            "scale": {"px_per_meter": 50}, "background": null,
            "ceiling_height_m": 2.75
        },
        "elements": [
            {
                "id": "wall_top", "type": "wall", "role": "EXISTING",
                "loadBearing": true, "thickness": 20, "zoneType": null,
                "relatedTo": null, "selected": false,
                "style": {"color": "#b45a3c", "textureUrl": null},
                "geometry": {"kind": "segment", "points": [100, 100, 800, 100], "openings": null}
            },
            {
                "id": "zone_living", "type": "zone", "role": "EXISTING",
                "loadBearing": null, "thickness": null, "zoneType": "living_room",
                "relatedTo": ["wall_top"], "selected": true,
                "style": {"color": "#FFE5CC", "textureUrl": null},
                "geometry": {"kind": "polygon", "points": [100, 100, 450, 100, 450, 600, 100, 600]}
            },
            {
                "id": "label_living", "type": "label", "role": "EXISTING",
                "relatedTo": ["zone_living"], "style": null, "text": "Living",
                "geometry": {"kind": "point", "x": 275, "y": 330}
            }
        ],
        "objects3d": [
            {
                "id": "bed_main", "type": "bed",
                "position": {"x": 15, "y": 0, "z": 3},
                "size": {"x": 3, "y": 0.6, "z": 1.6},
                "rotation": {"x": 0, "y": 1.57, "z": 0},
                "wallId": null, "zoneId": "zone_living", "selected": false,
                "meta": {"note": "bed"}
            }
        ]
    }
}"##;

#[test]
fn test_load_plan_version_envelope() {
    let loaded = load_plan_str(VERSION_JSON).unwrap();
    let version = loaded.version.as_ref().unwrap();
    assert_eq!(version.version_type, VersionType::Modified);

    let doc = &loaded.document;
    assert_eq!(doc.len(), 3);
    assert_eq!(doc.meta.ceiling_height_m, Some(2.75));
    assert_eq!(doc.scale().px_per_meter(), 50.0);
    assert_eq!(doc.count_of(ElementKind::Wall), 1);

    let wall = doc.walls().next().unwrap();
    assert_eq!(wall.role, Role::Existing);
    assert_eq!(
        wall.style.as_ref().and_then(|s| s.color.as_deref()),
        Some("#b45a3c")
    );

    let zone = doc.zones().next().unwrap();
    assert_eq!(zone.zone_type, ZoneType::LivingRoom);

    assert_eq!(loaded.objects.len(), 1);
    assert_eq!(loaded.objects[0].kind, Object3DType::Bed);
    assert!(doc.validate().is_ok());
}

#[test]
fn test_document_json_round_trip() {
    let loaded = load_plan_str(VERSION_JSON).unwrap();
    let json = loaded.document.to_json_pretty().unwrap();
    let back = PlanDocument::from_json(&json).unwrap();
    assert_eq!(back, loaded.document);
}

#[test]
fn test_rotated_element_writes_base_geometry() {
    let json = r#"{
        "meta": {"width": 100, "height": 100, "unit": "px"},
        "elements": [
            {"id": "d1", "type": "door", "role": "NEW", "rotation": 90,
             "geometry": {"kind": "segment", "points": [50, 0, 50, 100]}}
        ]
    }"#;
    let doc = PlanDocument::from_json(json).unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    let base = &value["elements"][0]["baseGeometry"];
    assert_eq!(base["kind"], "segment");

    let Element::Door(door) = &doc.elements[0] else {
        panic!("expected door");
    };
    let base = door.base_geometry.unwrap();
    assert!((base.points[1] - 50.0).abs() < 1e-9);
    assert!((base.points[3] - 50.0).abs() < 1e-9);
}

#[test]
fn test_load_plan_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VERSION_JSON.as_bytes()).unwrap();
    let loaded = load_plan_file(file.path()).unwrap();
    assert_eq!(loaded.document.len(), 3);

    assert!(load_plan_file("/nonexistent/plan.json").is_err());
}
