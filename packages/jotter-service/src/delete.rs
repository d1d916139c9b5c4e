use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{JotterService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub note_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub note_id: Uuid,
}

impl JotterService {
	/// Deleting an id that does not exist succeeds; the outcome is the same.
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		self.store.delete(req.note_id).await?;

		tracing::info!(note_id = %req.note_id, "Note deleted.");

		Ok(DeleteResponse { note_id: req.note_id })
	}
}
