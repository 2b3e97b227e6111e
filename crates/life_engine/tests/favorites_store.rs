use std::fs;

use life_core::{FavoritesStore, Pattern, StoreError};
use life_engine::JsonFavoritesStore;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn absent_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let store = JsonFavoritesStore::new(temp.path().join("favorites.json"));
    assert_eq!(store.load().unwrap(), Pattern::default_favorite_names());
}

#[test]
fn malformed_file_is_an_error_not_an_empty_list() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("favorites.json");
    fs::write(&path, "{\"not\": \"a list\"}").unwrap();

    let store = JsonFavoritesStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
}

#[test]
fn unreadable_path_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    // A directory where the file should be.
    let store = JsonFavoritesStore::new(temp.path());
    assert!(matches!(store.load(), Err(StoreError::Io(_))));
}

#[test]
fn saved_names_load_back_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("favorites.json");
    let store = JsonFavoritesStore::new(&path);
    let names = vec!["Pulsar".to_string(), "Glider".to_string()];

    store.save(&names).unwrap();
    assert_eq!(store.load().unwrap(), names);

    let on_disk: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, names);
}

#[test]
fn saving_an_empty_list_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let store = JsonFavoritesStore::new(temp.path().join("favorites.json"));
    store.save(&[]).unwrap();
    assert_eq!(store.load().unwrap(), Vec::<String>::new());
}
