use shared::domain::Item;
use storage::{FileStore, ItemStore, KeyValueStore};

#[test]
fn item_record_survives_reopen_and_clear_removes_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profile").join("store.json");

    let mut store = ItemStore::new(FileStore::open(&path).expect("open"));
    let items = vec![Item::new("Milk").expect("item"), Item::new("Eggs").expect("item")];
    store.save_items("items", &items).expect("save");
    drop(store);

    let raw = std::fs::read_to_string(&path).expect("read store file");
    assert!(raw.contains("items"), "store file should hold the record: {raw}");

    let mut store = ItemStore::new(FileStore::open(&path).expect("reopen"));
    assert_eq!(store.load_items("items").expect("load"), Some(items));

    store.delete_items("items").expect("delete");
    drop(store);

    let reopened = FileStore::open(&path).expect("reopen after delete");
    assert_eq!(reopened.get_item("items").expect("get"), None);
}

#[test]
fn separate_keys_hold_separate_lists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.json");

    let mut store = ItemStore::new(FileStore::open(&path).expect("open"));
    store
        .save_items("groceries", &vec![Item::new("Milk").expect("item")])
        .expect("save groceries");
    store
        .save_items("chores", &vec![Item::new("Laundry").expect("item")])
        .expect("save chores");

    assert_eq!(
        store.load_items("groceries").expect("load"),
        Some(vec![Item::new("Milk").expect("item")])
    );
    assert_eq!(
        store.load_items("chores").expect("load"),
        Some(vec![Item::new("Laundry").expect("item")])
    );
}
