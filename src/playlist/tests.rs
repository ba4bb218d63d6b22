use super::*;

#[test]
fn create_preserves_order_and_allows_duplicates() {
    let mut store = PlaylistStore::default();
    let ids = vec!["b".to_string(), "a".to_string(), "b".to_string()];
    let pl = store.create("Focus", ids.clone()).unwrap();
    assert_eq!(pl.name, "Focus");
    assert_eq!(pl.tracks, ids);
}

#[test]
fn create_rejects_empty_selection() {
    let mut store = PlaylistStore::default();
    assert!(matches!(
        store.create("Empty", Vec::new()),
        Err(PlaylistError::EmptySelection)
    ));
    assert!(store.is_empty());
}

#[test]
fn blank_names_fall_back_to_untitled() {
    let mut store = PlaylistStore::default();
    let pl = store.create("   ", vec!["a".into()]).unwrap();
    assert_eq!(pl.name, "Untitled");
}

#[test]
fn newest_playlist_first() {
    let mut store = PlaylistStore::default();
    store.create("older", vec!["a".into()]).unwrap();
    store.create("newer", vec!["b".into()]).unwrap();
    assert_eq!(store.all()[0].name, "newer");
    assert_eq!(store.all()[1].name, "older");
}

#[test]
fn update_replaces_in_place_and_checks_id() {
    let mut store = PlaylistStore::default();
    let id = store.create("old", vec!["a".into()]).unwrap().id.clone();

    store
        .update(&id, "new", vec!["c".into(), "a".into()])
        .unwrap();
    let pl = store.get(&id).unwrap();
    assert_eq!(pl.name, "new");
    assert_eq!(pl.tracks, vec!["c".to_string(), "a".to_string()]);

    assert!(matches!(
        store.update("nope", "x", vec!["a".into()]),
        Err(PlaylistError::NotFound(_))
    ));
    assert!(matches!(
        store.update(&id, "x", Vec::new()),
        Err(PlaylistError::EmptySelection)
    ));
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let mut store = PlaylistStore::default();
    let id = store.create("gone", vec!["a".into()]).unwrap().id.clone();
    assert!(store.delete(&id));
    assert!(!store.delete(&id));
    assert!(store.is_empty());
}
