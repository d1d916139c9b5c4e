use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::BoxFuture;
use jotter_service::{
	AddRequest, DeleteRequest, JotterService, KeywordsRequest, ListItem, ListRequest,
	NoteFetchRequest, ProjectFilterRequest, SearchRequest, UpdateRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
	#[error("Invalid arguments: {message}")]
	InvalidInput { message: String },
	#[error("{message}")]
	Failed { message: String },
}
impl From<jotter_service::Error> for ToolError {
	fn from(err: jotter_service::Error) -> Self {
		match err {
			jotter_service::Error::InvalidRequest { message } => Self::InvalidInput { message },
			other => Self::Failed { message: other.to_string() },
		}
	}
}

/// The seam between the agent loop and whatever executes tools. Tools act
/// only on the note service; the chat transcript is never theirs to touch.
pub trait ToolHandler
where
	Self: Send + Sync,
{
	fn call<'a>(
		&'a self,
		name: &'a str,
		arguments: &'a Value,
	) -> BoxFuture<'a, Result<String, ToolError>>;
}

pub struct JotterTools {
	service: Arc<JotterService>,
}
impl JotterTools {
	pub fn new(service: Arc<JotterService>) -> Self {
		Self { service }
	}

	async fn dispatch(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
		let args = arguments.as_object().cloned().unwrap_or_default();

		match name {
			"add_note" => self.add_note(&args).await,
			"list_notes" => self.list_notes(&args).await,
			"get_note" => self.get_note(&args).await,
			"update_note" => self.update_note(&args).await,
			"delete_note" => self.delete_note(&args).await,
			"notes_by_project" => self.notes_by_project(&args).await,
			"search_notes" => self.search_notes(&args).await,
			"note_stats" => self.note_stats().await,
			"note_keywords" => self.note_keywords(&args).await,
			other =>
				Err(ToolError::InvalidInput { message: format!("Unknown tool: {other}.") }),
		}
	}

	async fn add_note(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let content = required_str(args, "content")?;
		let project = optional_str(args, "project")?;
		let response =
			self.service.add(AddRequest { content: content.to_string(), project }).await?;

		Ok(format!("Note added with ID {}.", response.note_id))
	}

	async fn list_notes(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let limit = optional_u32(args, "limit")?;
		let response = self.service.list(ListRequest { limit }).await?;

		Ok(render_notes(&response.items))
	}

	async fn get_note(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let note_id = required_uuid(args, "note_id")?;
		let response = self.service.get_note(NoteFetchRequest { note_id }).await?;

		match response.note {
			Some(note) => Ok(format!(
				"{} | {} | {} | {}",
				note.note_id,
				note.project.as_deref().unwrap_or("-"),
				format_timestamp(note.created_at),
				note.content,
			)),
			None => Ok(format!("No note found with ID {note_id}.")),
		}
	}

	async fn update_note(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let note_id = required_uuid(args, "note_id")?;
		let content = required_str(args, "content")?;
		let project = optional_str(args, "project")?;
		let response = self
			.service
			.update(UpdateRequest { note_id, content: content.to_string(), project })
			.await?;

		match response.op {
			jotter_service::NoteOp::Update => Ok(format!("Note {note_id} updated.")),
			_ => Ok(format!("Note {note_id} did not exist; stored it as a new note.")),
		}
	}

	async fn delete_note(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let note_id = required_uuid(args, "note_id")?;

		self.service.delete(DeleteRequest { note_id }).await?;

		Ok(format!("Note with ID {note_id} has been deleted."))
	}

	async fn notes_by_project(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let project = required_str(args, "project")?;
		let response = self
			.service
			.list_by_project(ProjectFilterRequest { project: project.to_string() })
			.await?;

		Ok(render_notes(&response.items))
	}

	async fn search_notes(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let query = required_str(args, "query")?;
		let final_k = optional_u32(args, "final_k")?;
		let initial_k = optional_u32(args, "initial_k")?;
		let response = self
			.service
			.search(SearchRequest { query: query.to_string(), initial_k, final_k })
			.await?;

		if response.items.is_empty() {
			return Ok("No matching notes.".to_string());
		}

		let lines: Vec<String> = response
			.items
			.iter()
			.map(|item| {
				format!(
					"{} | {} | Rerank Score: {:.4} | Distance: {:.4} | {}",
					item.note_id,
					item.project.as_deref().unwrap_or("-"),
					item.rerank_score,
					item.distance,
					item.content,
				)
			})
			.collect();

		Ok(lines.join("\n"))
	}

	async fn note_stats(&self) -> Result<String, ToolError> {
		let stats = self.service.stats().await?;

		Ok(format!(
			"{} notes, {} words in total, {} distinct projects.",
			stats.note_count, stats.word_count, stats.project_count,
		))
	}

	async fn note_keywords(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
		let top_n = optional_u32(args, "top_n")?.map(|value| value as usize);
		let response = self.service.keywords(KeywordsRequest { top_n }).await?;

		if response.keywords.is_empty() {
			return Ok("No keywords yet.".to_string());
		}

		let lines: Vec<String> = response
			.keywords
			.iter()
			.map(|keyword| format!("{}: {}", keyword.word, keyword.count))
			.collect();

		Ok(lines.join("\n"))
	}
}
impl ToolHandler for JotterTools {
	fn call<'a>(
		&'a self,
		name: &'a str,
		arguments: &'a Value,
	) -> BoxFuture<'a, Result<String, ToolError>> {
		Box::pin(self.dispatch(name, arguments))
	}
}

/// Tool definitions in the chat endpoint's function-calling format.
pub fn definitions() -> Vec<Value> {
	vec![
		tool(
			"add_note",
			"Add a new note with free-text content and an optional project label.",
			serde_json::json!({
				"type": "object",
				"required": ["content"],
				"properties": {
					"content": { "type": "string", "description": "Full text of the note." },
					"project": { "type": ["string", "null"], "description": "Project label, e.g. \"web\"." }
				}
			}),
		),
		tool(
			"list_notes",
			"List stored notes. Order is not meaningful.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"limit": { "type": ["integer", "null"], "description": "Maximum notes to return. Defaults to 100." }
				}
			}),
		),
		tool(
			"get_note",
			"Fetch a single note by its exact ID.",
			serde_json::json!({
				"type": "object",
				"required": ["note_id"],
				"properties": {
					"note_id": { "type": "string" }
				}
			}),
		),
		tool(
			"update_note",
			"Replace a note's content and project label by ID. The new content is the full text, not a patch.",
			serde_json::json!({
				"type": "object",
				"required": ["note_id", "content"],
				"properties": {
					"note_id": { "type": "string" },
					"content": { "type": "string" },
					"project": { "type": ["string", "null"] }
				}
			}),
		),
		tool(
			"delete_note",
			"Delete a note by its exact ID.",
			serde_json::json!({
				"type": "object",
				"required": ["note_id"],
				"properties": {
					"note_id": { "type": "string" }
				}
			}),
		),
		tool(
			"notes_by_project",
			"List every note whose project label matches exactly.",
			serde_json::json!({
				"type": "object",
				"required": ["project"],
				"properties": {
					"project": { "type": "string" }
				}
			}),
		),
		tool(
			"search_notes",
			"Search notes semantically and rerank the candidates. A higher Rerank Score means greater relevance to the query.",
			serde_json::json!({
				"type": "object",
				"required": ["query"],
				"properties": {
					"query": { "type": "string" },
					"final_k": { "type": ["integer", "null"], "description": "Results to return. Defaults to 5." },
					"initial_k": { "type": ["integer", "null"], "description": "Similarity candidates to rerank. Defaults to 20." }
				}
			}),
		),
		tool(
			"note_stats",
			"Summarize the note collection: note count, word count, distinct projects.",
			serde_json::json!({ "type": "object", "properties": {} }),
		),
		tool(
			"note_keywords",
			"Most frequent keywords across all notes.",
			serde_json::json!({
				"type": "object",
				"properties": {
					"top_n": { "type": ["integer", "null"], "description": "Keywords to return. Defaults to 10." }
				}
			}),
		),
	]
}

fn tool(name: &str, description: &str, parameters: Value) -> Value {
	serde_json::json!({
		"type": "function",
		"function": {
			"name": name,
			"description": description,
			"parameters": parameters,
		}
	})
}

fn render_notes(items: &[ListItem]) -> String {
	if items.is_empty() {
		return "No notes stored.".to_string();
	}

	let lines: Vec<String> = items
		.iter()
		.map(|item| {
			format!(
				"{} | {} | {} | {}",
				item.note_id,
				item.project.as_deref().unwrap_or("-"),
				format_timestamp(item.created_at),
				item.content,
			)
		})
		.collect();

	lines.join("\n")
}

fn format_timestamp(ts: time::OffsetDateTime) -> String {
	ts.format(&time::format_description::well_known::Rfc3339)
		.unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
	let value = args
		.get(key)
		.ok_or_else(|| ToolError::InvalidInput { message: format!("{key} is required.") })?;
	let text = value
		.as_str()
		.ok_or_else(|| ToolError::InvalidInput { message: format!("{key} must be a string.") })?
		.trim();

	if text.is_empty() {
		return Err(ToolError::InvalidInput { message: format!("{key} must be non-empty.") });
	}

	Ok(text)
}

fn optional_str(args: &Map<String, Value>, key: &str) -> Result<Option<String>, ToolError> {
	let Some(value) = args.get(key) else { return Ok(None) };

	if value.is_null() {
		return Ok(None);
	}

	let text = value
		.as_str()
		.ok_or_else(|| ToolError::InvalidInput { message: format!("{key} must be a string.") })?
		.trim();

	if text.is_empty() { Ok(None) } else { Ok(Some(text.to_string())) }
}

fn optional_u32(args: &Map<String, Value>, key: &str) -> Result<Option<u32>, ToolError> {
	let Some(value) = args.get(key) else { return Ok(None) };

	if value.is_null() {
		return Ok(None);
	}

	let number = value.as_u64().filter(|value| *value > 0).ok_or_else(|| {
		ToolError::InvalidInput { message: format!("{key} must be a positive integer.") }
	})?;

	u32::try_from(number)
		.map(Some)
		.map_err(|_| ToolError::InvalidInput { message: format!("{key} is out of range.") })
}

fn required_uuid(args: &Map<String, Value>, key: &str) -> Result<Uuid, ToolError> {
	let raw = required_str(args, key)?;

	Uuid::parse_str(raw)
		.map_err(|_| ToolError::InvalidInput { message: format!("{key} must be a valid UUID.") })
}
