use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// The assistant's reply to one chat-completion call.
///
/// `message` is the raw assistant message as returned by the endpoint, kept
/// verbatim so a follow-up request can echo it back unchanged when tool
/// results are appended.
#[derive(Clone, Debug)]
pub struct ChatOutcome {
	pub message: Value,
	pub content: Option<String>,
	pub tool_calls: Vec<ToolCall>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
	pub id: String,
	pub name: String,
	pub arguments: Value,
}

pub async fn complete(
	cfg: &jotter_config::ChatConfig,
	messages: &[Value],
	tools: &[Value],
) -> Result<ChatOutcome> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut body = serde_json::json!({
		"model": cfg.model,
		"messages": messages,
	});

	if !tools.is_empty()
		&& let Some(map) = body.as_object_mut()
	{
		map.insert("tools".to_string(), Value::Array(tools.to_vec()));
	}

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_response(json)
}

fn parse_chat_response(json: Value) -> Result<ChatOutcome> {
	let message = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.cloned()
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing choices.".to_string(),
		})?;
	let content = message.get("content").and_then(|v| v.as_str()).map(ToString::to_string);
	let mut tool_calls = Vec::new();

	if let Some(calls) = message.get("tool_calls").and_then(|v| v.as_array()) {
		for call in calls {
			let id = call
				.get("id")
				.and_then(|v| v.as_str())
				.ok_or_else(|| Error::InvalidResponse {
					message: "Tool call is missing id.".to_string(),
				})?
				.to_string();
			let function = call.get("function").ok_or_else(|| Error::InvalidResponse {
				message: "Tool call is missing function.".to_string(),
			})?;
			let name = function
				.get("name")
				.and_then(|v| v.as_str())
				.ok_or_else(|| Error::InvalidResponse {
					message: "Tool call is missing function name.".to_string(),
				})?
				.to_string();
			// Arguments arrive as a JSON-encoded string. Anything unparsable
			// is handed to the tool boundary as an empty map so the rejection
			// happens there with a readable message.
			let arguments = function
				.get("arguments")
				.and_then(|v| v.as_str())
				.and_then(|raw| serde_json::from_str(raw).ok())
				.unwrap_or_else(|| serde_json::json!({}));

			tool_calls.push(ToolCall { id, name, arguments });
		}
	}

	Ok(ChatOutcome { message, content, tool_calls })
}
