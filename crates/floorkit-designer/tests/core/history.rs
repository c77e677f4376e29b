use floorkit_core::{PlanDocument, PlanMeta};
use floorkit_designer::PlanHistory;

fn doc(width: f64) -> PlanDocument {
    PlanDocument::new(PlanMeta {
        width,
        ..PlanMeta::default()
    })
}

#[test]
fn test_push_after_undo_discards_redo_tail() {
    let mut history = PlanHistory::new(&doc(1.0), 50);
    history.push(&doc(2.0));
    history.push(&doc(3.0));

    assert_eq!(history.undo().map(|d| d.meta.width), Some(2.0));
    assert!(history.can_redo());

    history.push(&doc(4.0));
    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(history.undo().map(|d| d.meta.width), Some(2.0));
    assert_eq!(history.undo().map(|d| d.meta.width), Some(1.0));
    assert!(history.undo().is_none());
}

#[test]
fn test_redo_walks_forward() {
    let mut history = PlanHistory::new(&doc(1.0), 50);
    history.push(&doc(2.0));
    history.undo();
    assert_eq!(history.redo().map(|d| d.meta.width), Some(2.0));
    assert!(history.redo().is_none());
}

#[test]
fn test_undo_twice_then_push_drops_both_redo_entries() {
    let mut history = PlanHistory::new(&doc(0.0), 50);
    history.push(&doc(1.0));
    history.push(&doc(2.0));

    history.undo();
    history.undo();
    assert!(history.push(&doc(3.0)));

    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(history.current().map(|s| s.document.meta.width), Some(3.0));
    assert_eq!(history.len(), 2);
}

#[test]
fn test_push_of_current_after_undo_drops_redo_tail() {
    let mut history = PlanHistory::new(&doc(0.0), 50);
    history.push(&doc(1.0));
    history.push(&doc(2.0));

    history.undo();
    history.undo();
    assert!(!history.push(&doc(0.0)));

    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    assert_eq!(history.len(), 1);
}
