use floorkit_core::{
    Element, Label, Object3D, Object3DType, Palette, PlanDocument, PlanMeta, PointGeometry,
    Polygon, Role, Scale, Segment, Vec3, Wall, Zone, ZoneType,
};
use floorkit_designer::scene3d::{build_furniture, AssetLoader, ModelHandle};
use floorkit_designer::{
    build_scene, spawn_point, ModelDirLoader, PickHit3D, Ray, Scene3D, SceneCache, SceneOptions,
    ViewMode, WalkOptions,
};
use nalgebra::{Point3, Vector3};
use tempfile::TempDir;

fn wall(id: &str, y: f64) -> Element {
    Element::Wall(Wall {
        id: id.into(),
        role: Role::Existing,
        load_bearing: None,
        thickness: Some(10.0),
        geometry: Segment::new(0.0, y, 200.0, y),
        rotation: None,
        base_geometry: None,
        style: None,
    })
}

fn doc() -> PlanDocument {
    let mut doc = PlanDocument::new(PlanMeta::default().with_scale(100.0));
    doc.push(wall("w1", 0.0));
    doc.push(wall("w2", 100.0));
    doc.push(Element::Label(Label {
        id: "l1".into(),
        text: "Hall".into(),
        geometry: PointGeometry::new(50.0, 50.0),
    }));
    doc
}

struct MissingModels;

impl AssetLoader for MissingModels {
    fn load(&self, kind: &Object3DType) -> anyhow::Result<ModelHandle> {
        anyhow::bail!("no model for {}", kind)
    }
}

#[test]
fn test_cache_matches_full_build() {
    let doc = doc();
    let mut cache = SceneCache::new(SceneOptions::default(), Palette::default());
    let diff = cache.rebuild(&doc);
    assert_eq!(diff.added, 3);

    let full = build_scene(&doc, &SceneOptions::default(), &Palette::default());
    let cached: Vec<_> = cache.draw_order().into_iter().cloned().collect();
    assert_eq!(full, cached);
}

#[test]
fn test_cache_diff_counts() {
    let mut doc = doc();
    let mut cache = SceneCache::default();
    cache.rebuild(&doc);

    doc.remove("w2");
    if let Some(l) = doc.find_mut("l1") {
        l.translate(10.0, 0.0);
    }
    let diff = cache.rebuild(&doc);
    assert_eq!((diff.added, diff.updated, diff.removed, diff.unchanged), (0, 1, 1, 1));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_scale_change_rebuilds_everything() {
    let mut doc = doc();
    let mut cache = SceneCache::default();
    cache.rebuild(&doc);
    doc.meta = doc.meta.clone().with_scale(50.0);
    let diff = cache.rebuild(&doc);
    assert_eq!(diff.added, 3);
    assert_eq!(diff.unchanged, 0);
}

#[test]
fn test_stale_furniture_load_discarded() {
    let doc = doc();
    let mut scene = Scene3D::default();
    scene.sync(&doc);

    let objects = vec![Object3D::new("chair-1", Object3DType::Chair, Vec3::new(50.0, 0.0, 50.0))];
    let stale = scene.begin_furniture_load();
    scene.sync(&doc);
    let meshes = objects
        .iter()
        .map(|o| build_furniture(o, &Scale::new(100.0), &MissingModels, &Palette::default()))
        .collect();
    assert!(!scene.complete_furniture_load(stale, meshes));
    assert!(scene.furniture().is_empty());

    assert!(scene.load_furniture(&objects, &doc.scale(), &MissingModels));
    assert_eq!(scene.furniture().len(), 1);
    assert!(scene.furniture()[0].is_placeholder());
}

#[test]
fn test_walk_mode_keeps_solids() {
    let mut doc = doc();
    let mut scene = Scene3D::default();
    scene.sync(&doc);
    scene.set_mode(ViewMode::Walk);

    doc.remove("w2");
    let stats = scene.sync(&doc);
    assert!(!stats.rebuilt_solids);
    assert_eq!(scene.walls().len(), 2);

    scene.set_mode(ViewMode::View);
    let stats = scene.sync(&doc);
    assert!(stats.rebuilt_solids);
    assert_eq!(scene.walls().len(), 1);
}

#[test]
fn test_model_dir_loader() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("table.glb"), b"glTF").unwrap();
    let loader = ModelDirLoader::new(dir.path());

    let handle = loader.load(&Object3DType::Table).unwrap();
    assert_eq!(handle.path, dir.path().join("table.glb"));
    let err = loader.load(&Object3DType::Bed).unwrap_err();
    assert!(format!("{:#}", err).contains("bed.glb"));
}

#[test]
fn test_pick_wall_from_above() {
    let doc = doc();
    let mut scene = Scene3D::default();
    scene.sync(&doc);

    let down = Ray::new(Point3::new(1.0, 10.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.pick(&down), Some(PickHit3D::Element("w1".into())));

    let miss = Ray::new(Point3::new(1.0, 10.0, -0.5), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.pick(&miss), None);

    scene.set_mode(ViewMode::Walk);
    assert_eq!(scene.pick(&down), None);
}

#[test]
fn test_pick_floor_beside_diagonal_wall() {
    let mut doc = PlanDocument::new(PlanMeta::default().with_scale(100.0));
    doc.push(Element::Zone(Zone {
        id: "floor".into(),
        zone_type: ZoneType::LivingRoom,
        related_to: vec![],
        geometry: Polygon::new(vec![0.0, 0.0, 1000.0, 0.0, 1000.0, 1000.0, 0.0, 1000.0]),
        rotation: None,
        base_geometry: None,
        style: None,
    }));
    doc.push(Element::Wall(Wall {
        id: "diag".into(),
        role: Role::Existing,
        load_bearing: None,
        thickness: Some(10.0),
        geometry: Segment::new(0.0, 0.0, 1000.0, 1000.0),
        rotation: None,
        base_geometry: None,
        style: None,
    }));
    let mut scene = Scene3D::default();
    scene.sync(&doc);

    // Plan (800, 200) lies about 4.2 m from the wall but inside its bounds.
    let far = Ray::new(Point3::new(8.0, 10.0, -2.0), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.pick(&far), Some(PickHit3D::Element("floor".into())));

    let on_wall = Ray::new(Point3::new(5.0, 10.0, -5.0), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.pick(&on_wall), Some(PickHit3D::Element("diag".into())));

    let outside = Ray::new(Point3::new(12.0, 10.0, -2.0), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(scene.pick(&outside), None);
}

#[test]
fn test_zero_scale_plan_stays_finite() {
    let doc = PlanDocument::from_json(
        r#"{
            "meta": {"width": 800, "height": 600, "unit": "px", "scale": {"px_per_meter": 0}},
            "elements": [
                {"id": "w1", "type": "wall", "role": "EXISTING", "thickness": 0.2,
                 "geometry": {"kind": "segment", "points": [0, 0, 4, 0]}},
                {"id": "z1", "type": "zone", "zoneType": "kitchen",
                 "geometry": {"kind": "polygon", "points": [0, 0, 4, 0, 4, 3, 0, 3]}}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(doc.scale().px_per_meter(), 1.0);

    let mut scene = Scene3D::default();
    scene.sync(&doc);
    let solid = &scene.walls()[0];
    assert!(solid.center.coords.iter().all(|v| v.is_finite()));
    assert!(solid.size.iter().all(|v| v.is_finite()));
    assert_eq!(solid.size.x, 4.0);

    let spawn = spawn_point(&doc, &WalkOptions::default());
    assert!(spawn.position.coords.iter().all(|v| v.is_finite()));
    assert!((spawn.position.x - 2.0).abs() < 1e-9);
}
