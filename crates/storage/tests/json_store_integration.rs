use std::path::PathBuf;
use std::sync::Arc;

use handcards_core::model::{CardDraft, CardId, CardStatus, Flashcard};
use handcards_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::json::JsonFileStore;
use storage::repository::{CardStore, FLASHCARDS_KEY, KeyValueStore, StorageError};

fn temp_store_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("handcards-{}-{tag}.json", std::process::id()))
}

fn build_card(front: &str, back: &str, rng: &mut StdRng) -> Flashcard {
    CardDraft::new(front, back)
        .validate()
        .unwrap()
        .assign_id(CardId::generate(fixed_now(), rng))
}

#[tokio::test]
async fn file_round_trip_preserves_cards() {
    let path = temp_store_path("roundtrip");
    let _ = tokio::fs::remove_file(&path).await;

    let mut rng = StdRng::seed_from_u64(42);
    let writer = CardStore::json_file(&path);
    writer.append(build_card("Hello", "World", &mut rng)).await.unwrap();
    writer.append(build_card("tremplin", "springboard", &mut rng)).await.unwrap();
    let second_id = writer.load_all().await.unwrap()[1].id.clone();
    writer
        .update_status(&second_id, CardStatus::Difficult)
        .await
        .unwrap();

    // A fresh store over the same file sees everything the first one wrote.
    let reader = CardStore::json_file(&path);
    let cards = reader.load_all().await.unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].front.as_str(), "Hello");
    assert_eq!(cards[0].status, CardStatus::New);
    assert_eq!(cards[1].status, CardStatus::Difficult);
    assert_ne!(cards[0].id, cards[1].id);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn missing_file_reads_as_empty_collection() {
    let path = temp_store_path("missing");
    let _ = tokio::fs::remove_file(&path).await;

    let store = CardStore::json_file(&path);
    assert_eq!(store.load_all().await.unwrap(), Vec::new());
}

#[tokio::test]
async fn corrupt_file_surfaces_as_serialization_error() {
    let path = temp_store_path("corrupt");
    tokio::fs::write(&path, "{ this is not json").await.unwrap();

    let err = CardStore::json_file(&path).load_all().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn unrelated_keys_survive_a_collection_write() {
    let path = temp_store_path("keys");
    let _ = tokio::fs::remove_file(&path).await;

    let backend = Arc::new(JsonFileStore::new(&path));
    backend
        .set("settings", serde_json::json!({ "theme": "dark" }))
        .await
        .unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let store = CardStore::new(backend.clone());
    store.append(build_card("Q", "A", &mut rng)).await.unwrap();

    assert_eq!(
        backend.get("settings").await.unwrap(),
        Some(serde_json::json!({ "theme": "dark" }))
    );
    assert!(backend.get(FLASHCARDS_KEY).await.unwrap().is_some());

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn write_creates_missing_parent_directories() {
    let dir = std::env::temp_dir().join(format!("handcards-{}-nested", std::process::id()));
    let _ = tokio::fs::remove_dir_all(&dir).await;
    let path = dir.join("deep").join("store.json");

    let mut rng = StdRng::seed_from_u64(42);
    let store = CardStore::json_file(&path);
    store.append(build_card("Q", "A", &mut rng)).await.unwrap();

    assert_eq!(store.load_all().await.unwrap().len(), 1);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
