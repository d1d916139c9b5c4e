use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, JotterService, Result};
use jotter_domain::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteOp {
	Add,
	Update,
	Delete,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
	pub note_id: Uuid,
	pub content: String,
	pub project: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
	pub note_id: Uuid,
	pub op: NoteOp,
}

impl JotterService {
	/// Full overwrite of content and project for the given id. The creation
	/// timestamp is carried over unchanged; an edit is not a re-creation.
	/// An unknown id becomes an insert (store-native upsert).
	pub async fn update(&self, req: UpdateRequest) -> Result<UpdateResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "content is required.".to_string() });
		}

		let existing = self.store.get(req.note_id).await?;
		let op = if existing.is_some() { NoteOp::Update } else { NoteOp::Add };
		let note = match existing {
			Some(previous) =>
				Note::from_parts(req.note_id, req.content, req.project, previous.created_at),
			None => {
				let fresh = Note::new(req.content, req.project);

				Note::from_parts(req.note_id, fresh.content, fresh.project, fresh.created_at)
			},
		};

		self.store.update(&note).await?;

		tracing::info!(note_id = %note.id, op = ?op, "Note updated.");

		Ok(UpdateResponse { note_id: note.id, op })
	}
}
