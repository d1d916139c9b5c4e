use std::path::Path;

use sqlx::{
	SqlitePool,
	sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use time::OffsetDateTime;

use crate::Result;

const SESSIONS_DB_FILE: &str = "sessions.db";

/// Conversation transcript log, keyed by a fixed session name. One SQLite
/// file under the configured data directory, one pool per process.
pub struct SessionStore {
	pub pool: SqlitePool,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct SessionMessage {
	pub role: String,
	pub content: String,
}

impl SessionStore {
	pub async fn open(data_dir: &str) -> Result<Self> {
		std::fs::create_dir_all(data_dir)?;

		let options = SqliteConnectOptions::new()
			.filename(Path::new(data_dir).join(SESSIONS_DB_FILE))
			.create_if_missing(true);
		let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await?;
		let store = Self { pool };

		store.ensure_schema().await?;

		Ok(store)
	}

	/// In-memory store for tests and ephemeral sessions.
	pub async fn open_in_memory() -> Result<Self> {
		let options = SqliteConnectOptions::new().in_memory(true);
		let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await?;
		let store = Self { pool };

		store.ensure_schema().await?;

		Ok(store)
	}

	async fn ensure_schema(&self) -> Result<()> {
		sqlx::query(
			"\
CREATE TABLE IF NOT EXISTS session_messages (
	seq INTEGER PRIMARY KEY AUTOINCREMENT,
	session TEXT NOT NULL,
	role TEXT NOT NULL,
	content TEXT NOT NULL,
	created_at INTEGER NOT NULL
)",
		)
		.execute(&self.pool)
		.await?;
		sqlx::query(
			"CREATE INDEX IF NOT EXISTS idx_session_messages_session \
			 ON session_messages (session, seq)",
		)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	pub async fn append(&self, session: &str, role: &str, content: &str) -> Result<()> {
		let now = OffsetDateTime::now_utc().unix_timestamp();

		sqlx::query(
			"INSERT INTO session_messages (session, role, content, created_at) \
			 VALUES ($1, $2, $3, $4)",
		)
		.bind(session)
		.bind(role)
		.bind(content)
		.bind(now)
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	pub async fn history(&self, session: &str) -> Result<Vec<SessionMessage>> {
		let messages = sqlx::query_as::<_, SessionMessage>(
			"SELECT role, content FROM session_messages WHERE session = $1 ORDER BY seq",
		)
		.bind(session)
		.fetch_all(&self.pool)
		.await?;

		Ok(messages)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn appends_and_replays_in_order() {
		let store = SessionStore::open_in_memory().await.expect("Failed to open store.");

		store.append("jotter", "user", "hello").await.expect("Failed to append.");
		store.append("jotter", "assistant", "hi there").await.expect("Failed to append.");

		let history = store.history("jotter").await.expect("Failed to load history.");

		assert_eq!(
			history,
			vec![
				SessionMessage { role: "user".to_string(), content: "hello".to_string() },
				SessionMessage { role: "assistant".to_string(), content: "hi there".to_string() },
			]
		);
	}

	#[tokio::test]
	async fn sessions_are_isolated_by_name() {
		let store = SessionStore::open_in_memory().await.expect("Failed to open store.");

		store.append("work", "user", "hello").await.expect("Failed to append.");

		let other = store.history("personal").await.expect("Failed to load history.");

		assert!(other.is_empty());
	}
}
