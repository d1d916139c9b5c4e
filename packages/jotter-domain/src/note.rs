use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored text record with an optional project label.
///
/// The id is assigned once at construction and is the sole key for
/// get/update/delete. `content` is always the full current text; an edit
/// replaces it wholesale. `created_at` is never refreshed after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
	pub id: Uuid,
	pub content: String,
	pub project: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl Note {
	pub fn new(content: impl Into<String>, project: Option<String>) -> Self {
		Self {
			id: Uuid::new_v4(),
			content: content.into(),
			project: project.filter(|value| !value.trim().is_empty()),
			created_at: OffsetDateTime::now_utc(),
		}
	}

	/// Rebuild a note from stored parts, keeping the original id and timestamp.
	pub fn from_parts(
		id: Uuid,
		content: String,
		project: Option<String>,
		created_at: OffsetDateTime,
	) -> Self {
		Self { id, content, project, created_at }
	}
}
