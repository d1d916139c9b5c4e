use std::collections::HashMap;

use jotter_config::{Error, from_vars};

fn sample_vars() -> HashMap<String, String> {
	[
		(jotter_config::ENV_API_KEY, "sk-test"),
		(jotter_config::ENV_API_BASE, "http://127.0.0.1:8000/v1"),
		(jotter_config::ENV_EMBEDDING_MODEL, "bge-m3"),
	]
	.into_iter()
	.map(|(key, value)| (key.to_string(), value.to_string()))
	.collect()
}

#[test]
fn loads_with_required_vars_and_defaults() {
	let cfg = from_vars(sample_vars()).expect("Failed to load config.");

	assert_eq!(cfg.providers.embedding.model, "bge-m3");
	assert_eq!(cfg.providers.embedding.path, "/embeddings");
	assert_eq!(cfg.providers.embedding.dimensions, 1024);
	assert_eq!(cfg.providers.rerank.model, "bge-reranker-v2-m3");
	assert_eq!(cfg.providers.rerank.path, "/rerank");
	assert_eq!(cfg.providers.chat.model, "qwen3");
	assert_eq!(cfg.providers.chat.path, "/chat/completions");
	assert_eq!(cfg.providers.chat.timeout_ms, 30_000);
	assert_eq!(cfg.storage.qdrant_url, "http://127.0.0.1:6334");
	assert_eq!(cfg.storage.collection, "jotter");
	assert_eq!(cfg.storage.vector_dim, 1024);
	assert_eq!(cfg.session.name, "jotter");
	assert_eq!(cfg.log_level, "info");
}

#[test]
fn reports_every_missing_required_var_at_once() {
	let err = from_vars(HashMap::new()).expect_err("Expected missing-env error.");

	match err {
		Error::MissingEnv { keys } => {
			assert_eq!(
				keys,
				vec![
					jotter_config::ENV_API_KEY.to_string(),
					jotter_config::ENV_API_BASE.to_string(),
					jotter_config::ENV_EMBEDDING_MODEL.to_string(),
				]
			);
		},
		other => panic!("Unexpected error: {other}."),
	}
}

#[test]
fn treats_blank_required_vars_as_missing() {
	let mut vars = sample_vars();

	vars.insert(jotter_config::ENV_API_KEY.to_string(), "   ".to_string());

	let err = from_vars(vars).expect_err("Expected missing-env error.");

	assert!(err.to_string().contains(jotter_config::ENV_API_KEY), "unexpected error: {err}");
}

#[test]
fn strips_trailing_slash_from_api_base() {
	let mut vars = sample_vars();

	vars.insert(jotter_config::ENV_API_BASE.to_string(), "http://localhost:8000/v1/".to_string());

	let cfg = from_vars(vars).expect("Failed to load config.");

	assert_eq!(cfg.providers.rerank.api_base, "http://localhost:8000/v1");
}

#[test]
fn rejects_zero_embedding_dimension() {
	let mut vars = sample_vars();

	vars.insert(jotter_config::ENV_EMBEDDING_DIM.to_string(), "0".to_string());

	let err = from_vars(vars).expect_err("Expected validation error.");

	assert!(
		err.to_string().contains("must be greater than zero"),
		"unexpected error: {err}"
	);
}

#[test]
fn rejects_non_numeric_timeout() {
	let mut vars = sample_vars();

	vars.insert(jotter_config::ENV_TIMEOUT_MS.to_string(), "soon".to_string());

	let err = from_vars(vars).expect_err("Expected validation error.");

	assert!(err.to_string().contains("positive integer"), "unexpected error: {err}");
}

#[test]
fn overrides_apply_to_every_provider_section() {
	let mut vars = sample_vars();

	vars.insert(jotter_config::ENV_RERANK_MODEL.to_string(), "rerank-large".to_string());
	vars.insert(jotter_config::ENV_CHAT_MODEL.to_string(), "chat-large".to_string());
	vars.insert(jotter_config::ENV_TIMEOUT_MS.to_string(), "5000".to_string());

	let cfg = from_vars(vars).expect("Failed to load config.");

	assert_eq!(cfg.providers.rerank.model, "rerank-large");
	assert_eq!(cfg.providers.chat.model, "chat-large");
	assert_eq!(cfg.providers.embedding.timeout_ms, 5_000);
	assert_eq!(cfg.providers.rerank.timeout_ms, 5_000);
	assert_eq!(cfg.providers.chat.timeout_ms, 5_000);
}
