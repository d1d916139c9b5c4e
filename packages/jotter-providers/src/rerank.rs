// std
use std::time::Duration;

// crates.io
use reqwest::Client;
use serde_json::Value;

// self
use crate::{Error, Result};

/// One scoring pass against the external rerank endpoint.
///
/// Returns one score per input document, aligned by position. Documents the
/// endpoint does not mention keep the minimum score of 0.0 so they sort
/// last. A single attempt with a fixed timeout; no retries.
pub async fn rerank(
	cfg: &jotter_config::RerankConfig,
	query: &str,
	docs: &[String],
) -> Result<Vec<f32>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "model": cfg.model, "query": query, "documents": docs });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_rerank_response(json, docs.len())
}

fn parse_rerank_response(json: Value, doc_count: usize) -> Result<Vec<f32>> {
	let mut scores = vec![0.0f32; doc_count];
	let results = json
		.get("results")
		.or_else(|| json.get("data"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Rerank response is missing results array.".to_string(),
		})?;

	for item in results {
		let index = item.get("index").and_then(|v| v.as_u64()).ok_or_else(|| {
			Error::InvalidResponse { message: "Rerank result is missing index.".to_string() }
		})? as usize;
		let score = item
			.get("relevance_score")
			.or_else(|| item.get("score"))
			.and_then(|v| v.as_f64())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Rerank result is missing score.".to_string(),
			})? as f32;

		if index < scores.len() {
			scores[index] = score;
		}
	}

	Ok(scores)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aligns_scores_by_index() {
		let json = serde_json::json!({
			"results": [
				{ "index": 1, "relevance_score": 0.2 },
				{ "index": 0, "relevance_score": 0.9 }
			]
		});
		let scores = parse_rerank_response(json, 2).expect("parse failed");

		assert_eq!(scores, vec![0.9, 0.2]);
	}

	#[test]
	fn unscored_documents_default_to_zero() {
		let json = serde_json::json!({
			"results": [
				{ "index": 2, "relevance_score": 0.99 }
			]
		});
		let scores = parse_rerank_response(json, 4).expect("parse failed");

		assert_eq!(scores, vec![0.0, 0.0, 0.99, 0.0]);
	}

	#[test]
	fn ignores_out_of_range_indices() {
		let json = serde_json::json!({
			"results": [
				{ "index": 7, "relevance_score": 0.5 }
			]
		});
		let scores = parse_rerank_response(json, 2).expect("parse failed");

		assert_eq!(scores, vec![0.0, 0.0]);
	}

	#[test]
	fn accepts_data_and_score_aliases() {
		let json = serde_json::json!({
			"data": [
				{ "index": 0, "score": 0.4 }
			]
		});
		let scores = parse_rerank_response(json, 1).expect("parse failed");

		assert_eq!(scores, vec![0.4]);
	}
}
