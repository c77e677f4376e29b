use std::cell::RefCell;
use std::rc::Rc;

use floorkit_core::{
    Element, ElementStyle, PlanDocument, PlanMeta, Point2, Polygon, Role, Segment, Wall, Zone,
    ZoneType,
};
use floorkit_designer::{
    Dimension, EditorCallbacks, InteractionState, KeyInput, PlanEditor, Shortcut,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Data(usize),
    Select(Option<String>),
}

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    fn data_changes(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Data(_)))
            .count()
    }

    fn last_selection(&self) -> Option<Option<String>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            Event::Select(id) => Some(id.clone()),
            _ => None,
        })
    }
}

impl EditorCallbacks for Recorder {
    fn on_data_change(&mut self, document: &PlanDocument) {
        self.events.borrow_mut().push(Event::Data(document.len()));
    }

    fn on_element_select(&mut self, id: Option<&str>) {
        self.events.borrow_mut().push(Event::Select(id.map(String::from)));
    }
}

fn plan() -> PlanDocument {
    let mut doc = PlanDocument::new(PlanMeta {
        width: 1000.0,
        height: 700.0,
        ..PlanMeta::default()
    });
    doc.push(Element::Wall(Wall {
        id: "w1".into(),
        role: Role::Existing,
        load_bearing: None,
        thickness: Some(20.0),
        geometry: Segment::new(100.0, 100.0, 300.0, 100.0),
        rotation: None,
        base_geometry: None,
        style: None,
    }));
    doc
}

fn editor() -> (PlanEditor, Recorder) {
    editor_with(plan())
}

fn editor_with(doc: PlanDocument) -> (PlanEditor, Recorder) {
    let recorder = Recorder::default();
    let mut editor = PlanEditor::default().with_callbacks(Box::new(recorder.clone()));
    editor.load_document(doc);
    (editor, recorder)
}

fn screen(editor: &PlanEditor, x: f64, y: f64) -> (f64, f64) {
    editor.viewport().plan_to_screen(Point2::new(x, y))
}

fn wall_points(editor: &PlanEditor) -> [f64; 4] {
    editor
        .document()
        .and_then(|d| d.find("w1"))
        .and_then(Element::segment)
        .map(|s| s.points)
        .unwrap_or_default()
}

fn close(a: [f64; 4], b: [f64; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
}

#[test]
fn test_drag_then_undo() {
    let (mut editor, recorder) = editor();
    editor.select(Some("w1"));

    let (px, py) = screen(&editor, 200.0, 100.0);
    let (mx, my) = screen(&editor, 250.0, 130.0);
    editor.pointer_down(px, py);
    assert!(matches!(editor.state(), InteractionState::Dragging { .. }));
    editor.pointer_move(mx, my);
    assert!(close(wall_points(&editor), [150.0, 130.0, 350.0, 130.0]));
    editor.pointer_up(mx, my);

    assert_eq!(editor.state(), &InteractionState::Idle);
    assert_eq!(editor.selection().selected_id(), Some("w1"));
    assert_eq!(recorder.data_changes(), 1);
    let cached = editor.scene().get("w1").map(|c| c.element.clone());
    assert_eq!(cached.as_ref(), editor.document().and_then(|d| d.find("w1")));

    assert!(editor.undo());
    assert!(close(wall_points(&editor), [100.0, 100.0, 300.0, 100.0]));
    assert_eq!(recorder.data_changes(), 2);
    assert!(editor.redo());
    assert!(close(wall_points(&editor), [150.0, 130.0, 350.0, 130.0]));
}

#[test]
fn test_drag_at_plan_scale() {
    let mut doc = plan();
    doc.meta = doc.meta.clone().with_scale(50.0);
    let original = doc.clone();
    let (mut editor, _) = editor_with(doc);
    editor.select(Some("w1"));

    let (px, py) = screen(&editor, 200.0, 100.0);
    let (mx, my) = screen(&editor, 250.0, 100.0);
    editor.pointer_down(px, py);
    editor.pointer_move(mx, my);
    editor.pointer_up(mx, my);
    assert!(close(wall_points(&editor), [150.0, 100.0, 350.0, 100.0]));

    let history = editor.history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.snapshots()[0].document, original);

    assert!(editor.undo());
    assert!(close(wall_points(&editor), [100.0, 100.0, 300.0, 100.0]));
    assert_eq!(editor.document(), Some(&original));
}

#[test]
fn test_leave_commits_drag() {
    let (mut editor, _) = editor();
    editor.select(Some("w1"));
    let (px, py) = screen(&editor, 200.0, 100.0);
    let (mx, my) = screen(&editor, 200.0, 160.0);
    editor.pointer_down(px, py);
    editor.pointer_move(mx, my);
    editor.pointer_leave();

    assert!(editor.navigation_enabled());
    assert!(editor.can_undo());
    assert!(close(wall_points(&editor), [100.0, 160.0, 300.0, 160.0]));
}

#[test]
fn test_paste_offsets_copy() {
    let (mut editor, recorder) = editor();
    editor.select(Some("w1"));
    assert_eq!(
        editor.handle_key(&KeyInput::new("KeyC", "c").with_ctrl()),
        Some(Shortcut::Copy)
    );
    editor.handle_key(&KeyInput::new("KeyV", "v").with_ctrl());

    let doc = editor.document().cloned().unwrap();
    assert_eq!(doc.len(), 2);
    let pasted = &doc.elements[1];
    assert!(pasted.id().starts_with("wall_"));
    assert_eq!(
        pasted.segment().map(|s| s.points),
        Some([150.0, 150.0, 350.0, 150.0])
    );
    let mut unshifted = pasted.translated(-50.0, -50.0);
    unshifted.set_id("w1");
    assert_eq!(Some(&unshifted), doc.find("w1"));
    assert_eq!(editor.selection().selected_id(), Some(pasted.id()));
    assert_eq!(recorder.last_selection(), Some(Some(pasted.id().to_string())));

    editor.handle_key(&KeyInput::new("KeyZ", "z").with_ctrl());
    assert_eq!(editor.document().map(PlanDocument::len), Some(1));
    assert_eq!(editor.selection().selected_id(), None);
}

#[test]
fn test_paste_zone_keeps_other_fields() {
    let mut doc = plan();
    doc.push(Element::Zone(Zone {
        id: "z1".into(),
        zone_type: ZoneType::Kitchen,
        related_to: vec!["w1".into()],
        geometry: Polygon::new(vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0]),
        rotation: None,
        base_geometry: None,
        style: Some(ElementStyle {
            color: Some("#ffeeaa".into()),
            texture_url: None,
        }),
    }));
    let (mut editor, _) = editor_with(doc);
    editor.select(Some("z1"));
    editor.handle_key(&KeyInput::new("KeyC", "c").with_ctrl());
    editor.handle_key(&KeyInput::new("KeyV", "v").with_ctrl());

    let doc = editor.document().cloned().unwrap();
    assert_eq!(doc.len(), 3);
    let source = doc.find("z1").cloned().unwrap();
    let pasted = doc.elements[2].clone();
    assert_ne!(pasted.id(), "z1");
    assert!(pasted.id().starts_with("zone_"));

    let Element::Zone(zone) = &pasted else {
        panic!("pasted element is not a zone: {:?}", pasted);
    };
    assert_eq!(
        zone.geometry.points,
        vec![50.0, 50.0, 150.0, 50.0, 150.0, 150.0, 50.0, 150.0]
    );
    assert_eq!(zone.zone_type, ZoneType::Kitchen);
    assert_eq!(zone.related_to, vec!["w1".to_string()]);

    let mut unshifted = pasted.translated(-50.0, -50.0);
    unshifted.set_id("z1");
    assert_eq!(unshifted, source);
}

#[test]
fn test_panel_cancel_reverts() {
    let (mut editor, recorder) = editor();
    editor.open_panel("w1").unwrap();
    editor.set_panel_rotation(45.0).unwrap();
    editor.set_panel_dimension(Dimension::Length, "3,5").unwrap();
    assert!(!close(wall_points(&editor), [100.0, 100.0, 300.0, 100.0]));

    editor.close_panel(false);
    assert_eq!(editor.document(), Some(&plan()));
    assert!(!editor.can_undo());
    assert_eq!(recorder.data_changes(), 0);
}

#[test]
fn test_panel_commit_records_one_snapshot() {
    let (mut editor, recorder) = editor();
    let before = editor.open_panel("w1").unwrap();
    assert_eq!(before.length_m, Some(200.0));

    editor.set_panel_rotation(30.0).unwrap();
    editor.set_panel_rotation(90.0).unwrap();
    editor.set_panel_dimension(Dimension::Length, "0").unwrap();
    let after = editor.panel_measurements().unwrap();
    assert_eq!(after.rotation_deg, 90.0);
    assert!((after.length_m.unwrap() - 200.0).abs() < 1e-6);

    editor.close_panel(true);
    assert_eq!(editor.history().map(|h| h.len()), Some(2));
    assert_eq!(recorder.data_changes(), 1);
}

#[test]
fn test_panel_rejects_garbage() {
    let (mut editor, _) = editor();
    editor.open_panel("w1").unwrap();
    assert!(editor.set_panel_dimension(Dimension::Length, "abc").is_err());
    assert!(editor.set_panel_dimension(Dimension::Width, "2").is_err());
}
