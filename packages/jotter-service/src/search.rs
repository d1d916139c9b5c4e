use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, JotterService, Result};
use jotter_domain::Note;

const DEFAULT_INITIAL_K: u32 = 20;
const DEFAULT_FINAL_K: u32 = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// Candidates fetched from similarity search before reranking.
	pub initial_k: Option<u32>,
	/// Results returned after reranking.
	pub final_k: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchItem {
	pub note_id: Uuid,
	pub content: String,
	pub project: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Store-native cosine distance; lower = more similar.
	pub distance: f32,
	/// External reranker metric; higher = more relevant, 0.0 when unscored.
	pub rerank_score: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<SearchItem>,
}

impl JotterService {
	/// Two-stage retrieval: a cheap similarity search for recall, then an
	/// external rerank pass for precision. The two scores stay separate;
	/// they are not on comparable scales.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query is required.".to_string() });
		}

		let initial_k = req.initial_k.unwrap_or(DEFAULT_INITIAL_K);
		let final_k = req.final_k.unwrap_or(DEFAULT_FINAL_K);

		if initial_k == 0 || final_k == 0 {
			return Err(Error::InvalidRequest {
				message: "initial_k and final_k must be greater than zero.".to_string(),
			});
		}

		let candidates = self.store.similarity_query(query, initial_k).await?;

		if candidates.is_empty() {
			return Ok(SearchResponse { items: Vec::new() });
		}

		let docs: Vec<String> =
			candidates.iter().map(|(note, _)| note.content.clone()).collect();
		let scores = match self
			.providers
			.rerank
			.rerank(&self.cfg.providers.rerank, query, &docs)
			.await
		{
			Ok(scores) => scores,
			Err(err) => {
				// Degrade to similarity order; an unreachable reranker must
				// not fail the search.
				tracing::warn!(error = %err, "Rerank failed; returning similarity order.");

				Vec::new()
			},
		};

		Ok(SearchResponse { items: merge_reranked(candidates, &scores, final_k) })
	}
}

/// Combine similarity candidates with rerank scores matched by positional
/// index, order by score descending, and truncate.
///
/// The sort is stable, so candidates with equal scores (including every
/// unscored candidate at 0.0) keep their similarity order.
fn merge_reranked(
	candidates: Vec<(Note, f32)>,
	scores: &[f32],
	final_k: u32,
) -> Vec<SearchItem> {
	let mut items: Vec<SearchItem> = candidates
		.into_iter()
		.enumerate()
		.map(|(idx, (note, distance))| SearchItem {
			note_id: note.id,
			content: note.content,
			project: note.project,
			created_at: note.created_at,
			distance,
			rerank_score: scores.get(idx).copied().unwrap_or(0.0),
		})
		.collect();

	items.sort_by(|a, b| cmp_f32_desc(a.rerank_score, b.rerank_score));
	items.truncate(final_k as usize);

	items
}

fn cmp_f32_desc(a: f32, b: f32) -> std::cmp::Ordering {
	b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(content: &str, distance: f32) -> (Note, f32) {
		(Note::new(content, None), distance)
	}

	fn contents(items: &[SearchItem]) -> Vec<&str> {
		items.iter().map(|item| item.content.as_str()).collect()
	}

	#[test]
	fn orders_by_rerank_score_descending() {
		let candidates = vec![
			candidate("a", 0.1),
			candidate("b", 0.2),
			candidate("c", 0.3),
		];
		let items = merge_reranked(candidates, &[0.9, 0.5, 0.99], 5);

		assert_eq!(contents(&items), vec!["c", "a", "b"]);
	}

	#[test]
	fn unscored_tail_keeps_similarity_order() {
		let candidates = vec![
			candidate("a", 0.1),
			candidate("b", 0.2),
			candidate("c", 0.3),
			candidate("d", 0.4),
			candidate("e", 0.5),
			candidate("f", 0.6),
		];
		// Only the first three candidates receive scores.
		let items = merge_reranked(candidates, &[0.9, 0.5, 0.99], 5);

		assert_eq!(contents(&items), vec!["c", "a", "b", "d", "e"]);
		assert_eq!(items[3].rerank_score, 0.0);
		assert_eq!(items[4].rerank_score, 0.0);
	}

	#[test]
	fn empty_scores_degrade_to_similarity_order() {
		let candidates = vec![
			candidate("a", 0.1),
			candidate("b", 0.2),
			candidate("c", 0.3),
		];
		let items = merge_reranked(candidates, &[], 5);

		assert_eq!(contents(&items), vec!["a", "b", "c"]);
		assert!(items.iter().all(|item| item.rerank_score == 0.0));
	}

	#[test]
	fn truncates_to_final_k() {
		let candidates = (0..20).map(|i| candidate(&format!("n{i}"), 0.01 * i as f32)).collect();
		let items = merge_reranked(candidates, &[], 5);

		assert_eq!(items.len(), 5);
	}

	#[test]
	fn fewer_candidates_than_final_k_is_not_an_error() {
		let candidates = vec![candidate("only", 0.1)];
		let items = merge_reranked(candidates, &[0.7], 5);

		assert_eq!(items.len(), 1);
		assert_eq!(items[0].rerank_score, 0.7);
	}

	#[test]
	fn equal_scores_keep_similarity_order() {
		let candidates = vec![
			candidate("first", 0.1),
			candidate("second", 0.2),
			candidate("third", 0.3),
		];
		let items = merge_reranked(candidates, &[0.5, 0.5, 0.5], 5);

		assert_eq!(contents(&items), vec!["first", "second", "third"]);
	}

	#[test]
	fn distance_is_preserved_alongside_score() {
		let candidates = vec![candidate("a", 0.25)];
		let items = merge_reranked(candidates, &[0.8], 5);

		assert_eq!(items[0].distance, 0.25);
		assert_eq!(items[0].rerank_score, 0.8);
	}
}
