#[derive(Debug, Clone)]
pub struct Config {
	pub providers: Providers,
	pub storage: Storage,
	pub session: Session,
	pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Providers {
	pub embedding: EmbeddingConfig,
	pub rerank: RerankConfig,
	pub chat: ChatConfig,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct RerankConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Storage {
	pub qdrant_url: String,
	pub collection: String,
	pub vector_dim: u32,
	pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct Session {
	pub name: String,
}
