use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{JotterService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteFetchRequest {
	pub note_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteFetchResponse {
	pub note: Option<NoteDetails>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NoteDetails {
	pub note_id: Uuid,
	pub content: String,
	pub project: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

impl JotterService {
	/// An unknown id is an empty result, never an error.
	pub async fn get_note(&self, req: NoteFetchRequest) -> Result<NoteFetchResponse> {
		let note = self.store.get(req.note_id).await?.map(|note| NoteDetails {
			note_id: note.id,
			content: note.content,
			project: note.project,
			created_at: note.created_at,
		});

		Ok(NoteFetchResponse { note })
	}
}
