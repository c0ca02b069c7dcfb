use stencil::model::{Region, SceneSnapshot, Vertex};
use stencil::History;

fn snap(tag: i32) -> SceneSnapshot {
    let mut s = SceneSnapshot::empty();
    s.regions.push(Region {
        id: format!("Area_{tag}"),
        vertices: vec![
            Vertex { x: tag, y: 0, control: None },
            Vertex { x: tag + 10, y: 0, control: None },
            Vertex { x: tag, y: 10, control: None },
        ],
        fill_color: "#336699".into(),
        fill_opacity: 0.5,
        label: None,
    });
    s
}

#[test]
fn undo_and_redo_walk_the_timeline() {
    let mut h = History::new(0);
    let a = snap(1);
    let b = snap(2);
    h.capture(&a).unwrap();
    h.capture(&b).unwrap();

    assert_eq!(h.undo().unwrap(), Some(a.clone()));
    assert_eq!(h.redo().unwrap(), Some(b.clone()));
    assert!(h.redo().unwrap().is_none(), "redo at the tail is a no-op");
}

#[test]
fn undo_stops_at_the_oldest_entry() {
    let mut h = History::new(0);
    h.capture(&snap(1)).unwrap();
    assert!(h.undo().unwrap().is_none());
    assert!(!h.can_undo());
}

#[test]
fn capturing_while_undone_discards_the_stale_future() {
    let mut h = History::new(0);
    let a = snap(1);
    h.capture(&a).unwrap();
    h.capture(&snap(2)).unwrap();
    h.capture(&snap(3)).unwrap();

    h.undo().unwrap();
    h.undo().unwrap();
    let c = snap(4);
    h.capture(&c).unwrap();

    assert_eq!(h.len(), 2);
    assert!(!h.can_redo(), "the redo branch is gone");
    assert_eq!(h.undo().unwrap(), Some(a));
    assert_eq!(h.redo().unwrap(), Some(c));
}

#[test]
fn entries_are_decoupled_from_later_mutation() {
    let mut h = History::new(0);
    let mut a = snap(1);
    h.capture(&a).unwrap();
    a.regions[0].vertices[0].x = 999;
    h.capture(&a).unwrap();

    let restored = h.undo().unwrap().unwrap();
    assert_eq!(restored.regions[0].vertices[0].x, 1);
}

#[test]
fn depth_limit_evicts_the_oldest_entries() {
    let mut h = History::new(3);
    for i in 1..=5 {
        h.capture(&snap(i)).unwrap();
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.position(), 3);

    // Only two steps back remain.
    assert_eq!(h.undo().unwrap(), Some(snap(4)));
    assert_eq!(h.undo().unwrap(), Some(snap(3)));
    assert!(h.undo().unwrap().is_none());
}

#[test]
fn current_tracks_the_pointer() {
    let mut h = History::new(0);
    assert!(h.current().unwrap().is_none());
    h.capture(&snap(1)).unwrap();
    h.capture(&snap(2)).unwrap();
    h.undo().unwrap();
    assert_eq!(h.current().unwrap(), Some(snap(1)));
}

#[test]
fn clear_empties_everything() {
    let mut h = History::new(0);
    h.capture(&snap(1)).unwrap();
    h.clear();
    assert!(h.is_empty());
    assert_eq!(h.position(), 0);
    assert!(h.undo().unwrap().is_none());
}
