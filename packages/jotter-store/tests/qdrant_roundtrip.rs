//! Round-trip tests against a live Qdrant instance.
//!
//! Gated on `JOTTER_TEST_QDRANT_URL`; every test is a silent no-op when the
//! variable is unset so the default test run needs no backend.

use std::{collections::HashSet, env, sync::Arc};

use uuid::Uuid;

use jotter_domain::Note;
use jotter_store::{BoxFuture, Embedder, NoteStore};

const ENV_QDRANT_URL: &str = "JOTTER_TEST_QDRANT_URL";
const TEST_DIM: u32 = 4;

/// Deterministic stand-in for the embedding endpoint: equal texts map to
/// equal vectors, so self-similarity is exact.
struct HashEmbedder;
impl Embedder for HashEmbedder {
	fn embed<'a>(
		&'a self,
		texts: &'a [String],
	) -> BoxFuture<'a, jotter_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(texts.iter().map(|text| hash_vector(text)).collect()) })
	}
}

fn hash_vector(text: &str) -> Vec<f32> {
	let mut state: u64 = 0xcbf2_9ce4_8422_2325;

	for byte in text.bytes() {
		state ^= byte as u64;
		state = state.wrapping_mul(0x100_0000_01b3);
	}

	let mut out = Vec::with_capacity(TEST_DIM as usize);

	for _ in 0..TEST_DIM {
		state ^= state << 13;
		state ^= state >> 7;
		state ^= state << 17;
		out.push(((state % 2_000) as f32 - 1_000.0) / 1_000.0);
	}

	let norm = out.iter().map(|v| v * v).sum::<f32>().sqrt().max(f32::EPSILON);

	out.into_iter().map(|v| v / norm).collect()
}

async fn test_store() -> Option<NoteStore> {
	let url = env::var(ENV_QDRANT_URL).ok()?;
	let storage = jotter_config::Storage {
		qdrant_url: url,
		collection: format!("jotter_test_{}", Uuid::new_v4().simple()),
		vector_dim: TEST_DIM,
		data_dir: ".jotter-test".to_string(),
	};
	let store = NoteStore::with_embedder(&storage, Arc::new(HashEmbedder))
		.expect("Failed to build note store.");

	store.ensure_collection().await.expect("Failed to create collection.");

	Some(store)
}

async fn cleanup(store: NoteStore) {
	let _ = store.client.delete_collection(store.collection.clone()).await;
}

#[tokio::test]
async fn added_note_round_trips_by_id() {
	let Some(store) = test_store().await else { return };
	let note = Note::new("ship the release notes", Some("docs".to_string()));

	store.add(&note).await.expect("Failed to add note.");

	let fetched =
		store.get(note.id).await.expect("Failed to get note.").expect("Note must exist.");

	assert_eq!(fetched.id, note.id);
	assert_eq!(fetched.content, note.content);
	assert_eq!(fetched.project, note.project);

	cleanup(store).await;
}

#[tokio::test]
async fn unknown_id_yields_none_not_error() {
	let Some(store) = test_store().await else { return };
	let fetched = store.get(Uuid::new_v4()).await.expect("Lookup must not error.");

	assert!(fetched.is_none());

	cleanup(store).await;
}

#[tokio::test]
async fn deleted_note_is_gone_and_redelete_is_a_noop() {
	let Some(store) = test_store().await else { return };
	let note = Note::new("temporary thought", None);

	store.add(&note).await.expect("Failed to add note.");
	store.delete(note.id).await.expect("Failed to delete note.");

	assert!(store.get(note.id).await.expect("Lookup must not error.").is_none());

	store.delete(note.id).await.expect("Deleting an absent id must succeed.");
	store.delete(Uuid::new_v4()).await.expect("Deleting an unknown id must succeed.");

	cleanup(store).await;
}

#[tokio::test]
async fn update_overwrites_every_field() {
	let Some(store) = test_store().await else { return };
	let note = Note::new("draft text", Some("alpha".to_string()));

	store.add(&note).await.expect("Failed to add note.");

	let edited =
		Note::from_parts(note.id, "final text".to_string(), None, note.created_at);

	store.update(&edited).await.expect("Failed to update note.");

	let fetched =
		store.get(note.id).await.expect("Failed to get note.").expect("Note must exist.");

	assert_eq!(fetched.content, "final text");
	assert_eq!(fetched.project, None);

	cleanup(store).await;
}

#[tokio::test]
async fn project_filter_matches_exactly() {
	let Some(store) = test_store().await else { return };
	let web = Note::new("fix navbar", Some("web".to_string()));
	let backend = Note::new("fix api", Some("web-backend".to_string()));

	store.add(&web).await.expect("Failed to add note.");
	store.add(&backend).await.expect("Failed to add note.");

	let matches = store.list_by_project("web").await.expect("Failed to filter notes.");

	assert_eq!(matches.len(), 1);
	assert_eq!(matches[0].id, web.id);

	cleanup(store).await;
}

#[tokio::test]
async fn list_all_is_idempotent_without_mutation() {
	let Some(store) = test_store().await else { return };

	for i in 0..3 {
		store.add(&Note::new(format!("note {i}"), None)).await.expect("Failed to add note.");
	}

	let first: HashSet<Uuid> =
		store.list_all(100).await.expect("Failed to list notes.").iter().map(|n| n.id).collect();
	let second: HashSet<Uuid> =
		store.list_all(100).await.expect("Failed to list notes.").iter().map(|n| n.id).collect();

	assert_eq!(first.len(), 3);
	assert_eq!(first, second);

	cleanup(store).await;
}

#[tokio::test]
async fn similarity_query_ranks_exact_text_first() {
	let Some(store) = test_store().await else { return };
	let target = Note::new("postgres connection pooling", None);

	store.add(&target).await.expect("Failed to add note.");
	store.add(&Note::new("grocery list", None)).await.expect("Failed to add note.");
	store.add(&Note::new("vacation ideas", None)).await.expect("Failed to add note.");

	let results = store
		.similarity_query("postgres connection pooling", 3)
		.await
		.expect("Failed to run similarity query.");

	assert_eq!(results.len(), 3);
	assert_eq!(results[0].0.id, target.id);
	assert!(results[0].1 < 1e-3, "exact match should have near-zero distance");

	cleanup(store).await;
}

#[tokio::test]
async fn similarity_query_on_empty_collection_is_empty() {
	let Some(store) = test_store().await else { return };
	let results =
		store.similarity_query("anything", 5).await.expect("Failed to run similarity query.");

	assert!(results.is_empty());

	cleanup(store).await;
}
