//! Process-wide favorites store. Runs in its own test binary so the global is
//! untouched by other tests.

use rickmorty_explorer::storage::{favorites, init_favorites};
use rickmorty_explorer::ExplorerError;
use tempfile::TempDir;

#[tokio::test]
async fn init_before_use_then_shared_for_process_lifetime() {
    assert!(matches!(favorites(), Err(ExplorerError::Storage(_))));

    let dir = TempDir::new().unwrap();
    let store = init_favorites(dir.path().join("favorites.json")).unwrap();
    store.add(7).await.unwrap();

    let other_dir = TempDir::new().unwrap();
    let again = init_favorites(other_dir.path().join("favorites.json")).unwrap();
    assert!(again.contains(7));

    let shared = favorites().unwrap();
    assert!(std::sync::Arc::ptr_eq(&store, &shared));
    assert!(!other_dir.path().join("favorites.json").exists());
}
