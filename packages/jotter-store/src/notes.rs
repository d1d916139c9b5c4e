pub const DENSE_VECTOR_NAME: &str = "dense";

// Filtered listings scroll at most this many points, matching the keyed
// store's lack of an unbounded read.
const SCROLL_CEILING: u32 = 1_000;

use std::{collections::HashMap, sync::Arc};

use qdrant_client::{
	Payload,
	qdrant::{
		Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter,
		GetPointsBuilder, PointId, PointStruct, Query, QueryPointsBuilder, ScrollPointsBuilder,
		UpsertPointsBuilder, Value, Vector, VectorParamsBuilder, VectorsConfigBuilder,
		point_id::PointIdOptions, value::Kind,
	},
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{BoxFuture, Result};
use jotter_domain::Note;

pub trait Embedder
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		texts: &'a [String],
	) -> BoxFuture<'a, jotter_providers::Result<Vec<Vec<f32>>>>;
}

/// The store-configured embedding function: one HTTP call per embed through
/// the shared provider config.
pub struct HttpEmbedder {
	cfg: jotter_config::EmbeddingConfig,
}
impl HttpEmbedder {
	pub fn new(cfg: jotter_config::EmbeddingConfig) -> Self {
		Self { cfg }
	}
}
impl Embedder for HttpEmbedder {
	fn embed<'a>(
		&'a self,
		texts: &'a [String],
	) -> BoxFuture<'a, jotter_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(jotter_providers::embedding::embed(&self.cfg, texts))
	}
}

pub struct NoteStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
	embedder: Arc<dyn Embedder>,
}
impl NoteStore {
	pub fn new(
		storage: &jotter_config::Storage,
		embedding: jotter_config::EmbeddingConfig,
	) -> Result<Self> {
		Self::with_embedder(storage, Arc::new(HttpEmbedder::new(embedding)))
	}

	pub fn with_embedder(
		storage: &jotter_config::Storage,
		embedder: Arc<dyn Embedder>,
	) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&storage.qdrant_url).build()?;

		Ok(Self {
			client,
			collection: storage.collection.clone(),
			vector_dim: storage.vector_dim,
			embedder,
		})
	}

	pub async fn ensure_collection(&self) -> Result<()> {
		if self.client.collection_exists(self.collection.clone()).await? {
			return Ok(());
		}

		let mut vectors_config = VectorsConfigBuilder::default();

		vectors_config.add_named_vector_params(
			DENSE_VECTOR_NAME,
			VectorParamsBuilder::new(self.vector_dim.into(), Distance::Cosine),
		);
		self.client
			.create_collection(
				CreateCollectionBuilder::new(self.collection.clone())
					.vectors_config(vectors_config),
			)
			.await?;

		Ok(())
	}

	/// Insert or overwrite the point keyed by the note id. Duplicate ids
	/// silently overwrite, matching the keyed store's semantics.
	pub async fn add(&self, note: &Note) -> Result<()> {
		self.upsert(note).await
	}

	/// Full overwrite of an existing note; behaves as an insert when the id
	/// is unknown.
	pub async fn update(&self, note: &Note) -> Result<()> {
		self.upsert(note).await
	}

	pub async fn get(&self, id: Uuid) -> Result<Option<Note>> {
		let response = self
			.client
			.get_points(
				GetPointsBuilder::new(
					self.collection.clone(),
					vec![PointId::from(id.to_string())],
				)
				.with_payload(true),
			)
			.await?;
		let note = response
			.result
			.first()
			.and_then(|point| decode_note(point.id.as_ref(), &point.payload));

		Ok(note)
	}

	/// Remove the point; absent ids are a no-op, not an error.
	pub async fn delete(&self, id: Uuid) -> Result<()> {
		self.client
			.delete_points(
				DeletePointsBuilder::new(self.collection.clone())
					.points(vec![PointId::from(id.to_string())])
					.wait(true),
			)
			.await?;

		Ok(())
	}

	/// Nearest-neighbor candidates for `text`, at most `k`, paired with
	/// cosine distance ascending (lower = more similar).
	pub async fn similarity_query(&self, text: &str, k: u32) -> Result<Vec<(Note, f32)>> {
		let query_vec = self.embed_one(text).await?;
		let response = self
			.client
			.query(
				QueryPointsBuilder::new(self.collection.clone())
					.query(Query::new_nearest(query_vec))
					.using(DENSE_VECTOR_NAME)
					.limit(k as u64)
					.with_payload(true),
			)
			.await?;
		let mut out = Vec::with_capacity(response.result.len());

		for point in &response.result {
			let Some(note) = decode_note(point.id.as_ref(), &point.payload) else {
				continue;
			};

			out.push((note, 1.0 - point.score));
		}

		Ok(out)
	}

	/// Up to `limit` notes in store-native order; no ordering guarantee.
	pub async fn list_all(&self, limit: u32) -> Result<Vec<Note>> {
		self.scroll(limit, None).await
	}

	/// All notes whose project label equals `project` exactly.
	pub async fn list_by_project(&self, project: &str) -> Result<Vec<Note>> {
		let filter = Filter::must([Condition::matches("project", project.to_string())]);

		self.scroll(SCROLL_CEILING, Some(filter)).await
	}

	async fn scroll(&self, limit: u32, filter: Option<Filter>) -> Result<Vec<Note>> {
		let mut scroll =
			ScrollPointsBuilder::new(self.collection.clone()).limit(limit).with_payload(true);

		if let Some(filter) = filter {
			scroll = scroll.filter(filter);
		}

		let response = self.client.scroll(scroll).await?;
		let mut out = Vec::with_capacity(response.result.len());

		for point in &response.result {
			let Some(note) = decode_note(point.id.as_ref(), &point.payload) else {
				continue;
			};

			out.push(note);
		}

		Ok(out)
	}

	async fn upsert(&self, note: &Note) -> Result<()> {
		let vec = self.embed_one(&note.content).await?;
		let point = note_point(note, vec)?;
		let upsert = UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
		let embeddings = self.embedder.embed(std::slice::from_ref(&text.to_string())).await?;
		let Some(vec) = embeddings.into_iter().next() else {
			return Err(crate::Error::Embedding {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vec.len() != self.vector_dim as usize {
			return Err(crate::Error::Embedding {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vec)
	}
}

fn note_point(note: &Note, vec: Vec<f32>) -> Result<PointStruct> {
	let created_at = note.created_at.format(&Rfc3339).map_err(|err| crate::Error::Encode {
		message: format!("Failed to format timestamp: {err}."),
	})?;
	let mut payload_map = HashMap::new();

	payload_map.insert("content".to_string(), Value::from(note.content.clone()));
	payload_map.insert(
		"project".to_string(),
		note.project
			.as_ref()
			.map(|project| Value::from(project.clone()))
			.unwrap_or_else(|| Value::from(serde_json::Value::Null)),
	);
	payload_map.insert("created_at".to_string(), Value::from(created_at));

	let mut vector_map = HashMap::new();

	vector_map.insert(DENSE_VECTOR_NAME.to_string(), Vector::from(vec));

	Ok(PointStruct::new(note.id.to_string(), vector_map, Payload::from(payload_map)))
}

fn decode_note(id: Option<&PointId>, payload: &HashMap<String, Value>) -> Option<Note> {
	let Some(note_id) = id.and_then(point_id_to_uuid) else {
		tracing::warn!("Stored point has no UUID id.");

		return None;
	};
	let Some(content) = payload_string(payload, "content") else {
		tracing::warn!(note_id = %note_id, "Stored point is missing content.");

		return None;
	};
	let Some(created_at) = payload_rfc3339(payload, "created_at") else {
		tracing::warn!(note_id = %note_id, "Stored point is missing created_at.");

		return None;
	};
	let project = payload_string(payload, "project");

	Some(Note::from_parts(note_id, content, project, created_at))
}

fn point_id_to_uuid(point_id: &PointId) -> Option<Uuid> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Uuid::parse_str(id).ok(),
		_ => None,
	}
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.to_string()),
		_ => None,
	}
}

fn payload_rfc3339(payload: &HashMap<String, Value>, key: &str) -> Option<OffsetDateTime> {
	let text = payload_string(payload, key)?;

	OffsetDateTime::parse(text.as_str(), &Rfc3339).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payload_of(note: &Note) -> HashMap<String, Value> {
		let point = note_point(note, vec![0.0]).expect("Failed to build point.");

		point.payload
	}

	#[test]
	fn note_round_trips_through_point_payload() {
		let note = Note::new("deploy on friday", Some("infra".to_string()));
		let payload = payload_of(&note);
		let decoded = decode_note(Some(&PointId::from(note.id.to_string())), &payload)
			.expect("Failed to decode note.");

		assert_eq!(decoded.id, note.id);
		assert_eq!(decoded.content, note.content);
		assert_eq!(decoded.project, note.project);
	}

	#[test]
	fn missing_project_decodes_to_none() {
		let note = Note::new("untagged", None);
		let payload = payload_of(&note);
		let decoded = decode_note(Some(&PointId::from(note.id.to_string())), &payload)
			.expect("Failed to decode note.");

		assert_eq!(decoded.project, None);
	}

	#[test]
	fn point_without_content_is_skipped() {
		let note = Note::new("text", None);
		let mut payload = payload_of(&note);

		payload.remove("content");

		assert!(decode_note(Some(&PointId::from(note.id.to_string())), &payload).is_none());
	}

	#[test]
	fn numeric_point_id_is_skipped() {
		let note = Note::new("text", None);
		let payload = payload_of(&note);

		assert!(decode_note(Some(&PointId::from(7)), &payload).is_none());
	}
}
