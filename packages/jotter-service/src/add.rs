use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, JotterService, Result};
use jotter_domain::Note;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddRequest {
	pub content: String,
	pub project: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddResponse {
	pub note_id: Uuid,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

impl JotterService {
	pub async fn add(&self, req: AddRequest) -> Result<AddResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "content is required.".to_string() });
		}

		let note = Note::new(req.content, req.project);

		self.store.add(&note).await?;

		tracing::info!(note_id = %note.id, "Note added.");

		Ok(AddResponse { note_id: note.id, created_at: note.created_at })
	}
}
