use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, JotterService, Result};
use jotter_domain::Note;

const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListRequest {
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectFilterRequest {
	pub project: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListItem {
	pub note_id: Uuid,
	pub content: String,
	pub project: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<ListItem>,
}

impl JotterService {
	/// Up to `limit` notes in store-native order.
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let limit = req.limit.unwrap_or(DEFAULT_LIST_LIMIT);

		if limit == 0 {
			return Err(Error::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			});
		}

		let notes = self.store.list_all(limit).await?;

		Ok(ListResponse { items: notes.into_iter().map(list_item).collect() })
	}

	/// Notes whose project label equals `project` exactly. A note filed
	/// under "web" is not returned for "web-backend".
	pub async fn list_by_project(&self, req: ProjectFilterRequest) -> Result<ListResponse> {
		let project = req.project.trim();

		if project.is_empty() {
			return Err(Error::InvalidRequest { message: "project is required.".to_string() });
		}

		let notes = self.store.list_by_project(project).await?;

		Ok(ListResponse { items: notes.into_iter().map(list_item).collect() })
	}
}

fn list_item(note: Note) -> ListItem {
	ListItem {
		note_id: note.id,
		content: note.content,
		project: note.project,
		created_at: note.created_at,
	}
}
