use super::*;

#[test]
fn store_parse_get_remove() {
    let store = DocumentTrees::new();
    let path = Path::new("/src/main.ts");
    store.parse_and_store(path, "const x = 1;");

    let tree = store.get(path).unwrap();
    assert_eq!(tree.text(), "const x = 1;");

    store.remove(path);
    assert!(store.get(path).is_none());
    assert!(store.is_empty());
}

#[test]
fn store_replaces_existing_snapshot() {
    let store = DocumentTrees::new();
    let path = Path::new("/src/a.ts");
    store.parse_and_store(path, "a");
    store.parse_and_store(path, "b;");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(path).unwrap().text(), "b;");
}

#[test]
fn store_lists_sorted_paths() {
    let store = DocumentTrees::default();
    store.parse_and_store(Path::new("/b.ts"), "");
    store.parse_and_store(Path::new("/a.ts"), "");
    assert_eq!(store.paths(), vec![PathBuf::from("/a.ts"), PathBuf::from("/b.ts")]);
}
