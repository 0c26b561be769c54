use std::fs;

use connect_engine::{KeyValueStore, MemoryStore, RonFileStore, StoreError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn file_store_round_trips_across_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state").join("store.ron");

    let store = RonFileStore::new(&path);
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", strings(&["a", "b"])).unwrap();
    assert!(path.is_file());

    let reopened = RonFileStore::new(&path);
    assert_eq!(reopened.get("k").unwrap(), Some(strings(&["a", "b"])));
    assert_eq!(reopened.get_or("other", strings(&["d"])).unwrap(), strings(&["d"]));
}

#[test]
fn remove_resets_key_to_default() {
    let temp = TempDir::new().unwrap();
    let store = RonFileStore::new(temp.path().join("store.ron"));
    store.set("k", strings(&["a"])).unwrap();
    store.set("keep", strings(&["x"])).unwrap();

    store.remove("k").unwrap();

    assert_eq!(store.get_or("k", Vec::new()).unwrap(), Vec::<String>::new());
    assert_eq!(store.get("keep").unwrap(), Some(strings(&["x"])));
}

#[test]
fn update_sees_current_value() {
    let store = MemoryStore::new();
    store.set("k", strings(&["a"])).unwrap();

    store
        .update("k", &mut |current| {
            let mut list = current.unwrap_or_default();
            list.push("b".to_string());
            Some(list)
        })
        .unwrap();
    assert_eq!(store.get("k").unwrap(), Some(strings(&["a", "b"])));

    store.update("k", &mut |_| None).unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn corrupt_file_is_reported_not_overwritten() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.ron");
    fs::write(&path, "this is not ron (").unwrap();

    let store = RonFileStore::new(&path);
    let err = store.get("k").unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));

    assert!(store.set("k", strings(&["a"])).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "this is not ron (");
}
