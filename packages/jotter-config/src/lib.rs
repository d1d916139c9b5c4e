mod error;
mod types;

pub use error::{Error, Result};
pub use types::{ChatConfig, Config, EmbeddingConfig, Providers, RerankConfig, Session, Storage};

use std::collections::HashMap;

pub const ENV_API_KEY: &str = "JOTTER_API_KEY";
pub const ENV_API_BASE: &str = "JOTTER_API_BASE";
pub const ENV_EMBEDDING_MODEL: &str = "JOTTER_EMBEDDING_MODEL";
pub const ENV_RERANK_MODEL: &str = "JOTTER_RERANK_MODEL";
pub const ENV_CHAT_MODEL: &str = "JOTTER_CHAT_MODEL";
pub const ENV_EMBEDDING_DIM: &str = "JOTTER_EMBEDDING_DIM";
pub const ENV_QDRANT_URL: &str = "JOTTER_QDRANT_URL";
pub const ENV_COLLECTION: &str = "JOTTER_COLLECTION";
pub const ENV_DATA_DIR: &str = "JOTTER_DATA_DIR";
pub const ENV_SESSION: &str = "JOTTER_SESSION";
pub const ENV_TIMEOUT_MS: &str = "JOTTER_TIMEOUT_MS";
pub const ENV_LOG: &str = "JOTTER_LOG";

const REQUIRED: &[&str] = &[ENV_API_KEY, ENV_API_BASE, ENV_EMBEDDING_MODEL];

const DEFAULT_RERANK_MODEL: &str = "bge-reranker-v2-m3";
const DEFAULT_CHAT_MODEL: &str = "qwen3";
const DEFAULT_EMBEDDING_DIM: &str = "1024";
const DEFAULT_QDRANT_URL: &str = "http://127.0.0.1:6334";
const DEFAULT_COLLECTION: &str = "jotter";
const DEFAULT_DATA_DIR: &str = ".jotter";
const DEFAULT_SESSION: &str = "jotter";
const DEFAULT_TIMEOUT_MS: &str = "30000";
const DEFAULT_LOG: &str = "info";

pub fn load() -> Result<Config> {
	from_vars(std::env::vars().collect())
}

pub fn from_vars(vars: HashMap<String, String>) -> Result<Config> {
	let missing: Vec<String> = REQUIRED
		.iter()
		.filter(|key| vars.get(**key).map(|value| value.trim().is_empty()).unwrap_or(true))
		.map(|key| key.to_string())
		.collect();

	if !missing.is_empty() {
		return Err(Error::MissingEnv { keys: missing });
	}

	let get = |key: &str, default: &str| -> String {
		vars.get(key)
			.map(|value| value.trim())
			.filter(|value| !value.is_empty())
			.unwrap_or(default)
			.to_string()
	};
	let api_key = get(ENV_API_KEY, "");
	let api_base = get(ENV_API_BASE, "").trim_end_matches('/').to_string();
	let timeout_ms = parse_u64(ENV_TIMEOUT_MS, &get(ENV_TIMEOUT_MS, DEFAULT_TIMEOUT_MS))?;
	let vector_dim = parse_u32(ENV_EMBEDDING_DIM, &get(ENV_EMBEDDING_DIM, DEFAULT_EMBEDDING_DIM))?;
	let cfg = Config {
		providers: Providers {
			embedding: EmbeddingConfig {
				api_base: api_base.clone(),
				api_key: api_key.clone(),
				path: "/embeddings".to_string(),
				model: get(ENV_EMBEDDING_MODEL, ""),
				dimensions: vector_dim,
				timeout_ms,
			},
			rerank: RerankConfig {
				api_base: api_base.clone(),
				api_key: api_key.clone(),
				path: "/rerank".to_string(),
				model: get(ENV_RERANK_MODEL, DEFAULT_RERANK_MODEL),
				timeout_ms,
			},
			chat: ChatConfig {
				api_base,
				api_key,
				path: "/chat/completions".to_string(),
				model: get(ENV_CHAT_MODEL, DEFAULT_CHAT_MODEL),
				timeout_ms,
			},
		},
		storage: Storage {
			qdrant_url: get(ENV_QDRANT_URL, DEFAULT_QDRANT_URL),
			collection: get(ENV_COLLECTION, DEFAULT_COLLECTION),
			vector_dim,
			data_dir: get(ENV_DATA_DIR, DEFAULT_DATA_DIR),
		},
		session: Session { name: get(ENV_SESSION, DEFAULT_SESSION) },
		log_level: get(ENV_LOG, DEFAULT_LOG),
	};

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.providers.embedding.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("{ENV_API_BASE} must be a non-empty URL."),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: format!("{ENV_EMBEDDING_DIM} must be greater than zero."),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{ENV_TIMEOUT_MS} must be greater than zero."),
		});
	}
	if cfg.storage.qdrant_url.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("{ENV_QDRANT_URL} must be non-empty."),
		});
	}
	if cfg.storage.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: format!("{ENV_COLLECTION} must be non-empty."),
		});
	}
	if cfg.storage.data_dir.trim().is_empty() {
		return Err(Error::Validation { message: format!("{ENV_DATA_DIR} must be non-empty.") });
	}
	if cfg.session.name.trim().is_empty() {
		return Err(Error::Validation { message: format!("{ENV_SESSION} must be non-empty.") });
	}

	Ok(())
}

fn parse_u64(key: &str, raw: &str) -> Result<u64> {
	raw.parse()
		.map_err(|_| Error::Validation { message: format!("{key} must be a positive integer.") })
}

fn parse_u32(key: &str, raw: &str) -> Result<u32> {
	raw.parse()
		.map_err(|_| Error::Validation { message: format!("{key} must be a positive integer.") })
}
