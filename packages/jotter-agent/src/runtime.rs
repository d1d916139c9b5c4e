use std::sync::Arc;

use serde_json::Value;

use crate::{Result, ToolHandler, tools};
use jotter_providers::chat::ChatOutcome;
use jotter_store::SessionStore;

/// A turn can spend at most this many completion rounds on tool calls.
const MAX_TOOL_ROUNDS: usize = 8;

const EXHAUSTED_REPLY: &str =
	"I could not finish that request; it needed more tool calls than one turn allows.";

const SYSTEM_PROMPT: &str = "You are Jotter, a second brain for development projects. \
You manage project-related notes, ideas, tasks, and code snippets through your tools: \
add, list, get, update, delete, filter-by-project, semantic search, and collection \
analysis. Be helpful, concise, and proactive. When the user asks a question, search the \
notes first and answer from the results. Pay close attention to the Rerank Score in \
search results; a higher score means greater relevance to the query.";

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a jotter_config::ChatConfig,
		messages: &'a [Value],
		tools: &'a [Value],
	) -> crate::BoxFuture<'a, jotter_providers::Result<ChatOutcome>>;
}

struct DefaultChat;

impl ChatProvider for DefaultChat {
	fn complete<'a>(
		&'a self,
		cfg: &'a jotter_config::ChatConfig,
		messages: &'a [Value],
		tools: &'a [Value],
	) -> crate::BoxFuture<'a, jotter_providers::Result<ChatOutcome>> {
		Box::pin(jotter_providers::chat::complete(cfg, messages, tools))
	}
}

pub struct AgentRuntime {
	cfg: jotter_config::Config,
	chat: Arc<dyn ChatProvider>,
	tools: Arc<dyn ToolHandler>,
	sessions: SessionStore,
}
impl AgentRuntime {
	pub fn new(
		cfg: jotter_config::Config,
		tools: Arc<dyn ToolHandler>,
		sessions: SessionStore,
	) -> Self {
		Self::with_chat(cfg, Arc::new(DefaultChat), tools, sessions)
	}

	pub fn with_chat(
		cfg: jotter_config::Config,
		chat: Arc<dyn ChatProvider>,
		tools: Arc<dyn ToolHandler>,
		sessions: SessionStore,
	) -> Self {
		Self { cfg, chat, tools, sessions }
	}

	/// One fully-awaited conversational turn: replay the session transcript,
	/// loop through tool rounds sequentially, persist the user/assistant
	/// exchange. Intermediate tool traffic stays in memory.
	pub async fn run_turn(&self, session: &str, user_text: &str) -> Result<String> {
		let mut messages =
			vec![serde_json::json!({ "role": "system", "content": SYSTEM_PROMPT })];

		for message in self.sessions.history(session).await? {
			messages.push(
				serde_json::json!({ "role": message.role, "content": message.content }),
			);
		}

		messages.push(serde_json::json!({ "role": "user", "content": user_text }));

		let tool_defs = tools::definitions();
		let mut answer = None;

		for _ in 0..MAX_TOOL_ROUNDS {
			let outcome =
				self.chat.complete(&self.cfg.providers.chat, &messages, &tool_defs).await?;

			if outcome.tool_calls.is_empty() {
				answer = Some(outcome.content.unwrap_or_default());

				break;
			}

			messages.push(outcome.message.clone());

			for call in &outcome.tool_calls {
				let result = match self.tools.call(&call.name, &call.arguments).await {
					Ok(text) => text,
					Err(err) => {
						tracing::warn!(tool = %call.name, error = %err, "Tool call failed.");

						format!("Tool call failed: {err}")
					},
				};

				messages.push(serde_json::json!({
					"role": "tool",
					"tool_call_id": call.id,
					"content": result,
				}));
			}
		}

		let answer = answer.unwrap_or_else(|| EXHAUSTED_REPLY.to_string());

		self.sessions.append(session, "user", user_text).await?;
		self.sessions.append(session, "assistant", &answer).await?;

		Ok(answer)
	}
}
