use serde::{Deserialize, Serialize};

use crate::{Error, JotterService, Result};
use jotter_domain::analysis;

// Analysis reads through the same bounded listing as list_all.
const ANALYSIS_SCAN_LIMIT: u32 = 1_000;
const DEFAULT_TOP_N: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsResponse {
	pub note_count: usize,
	pub word_count: usize,
	pub project_count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeywordsRequest {
	pub top_n: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeywordsResponse {
	pub keywords: Vec<KeywordEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeywordEntry {
	pub word: String,
	pub count: usize,
}

impl JotterService {
	pub async fn stats(&self) -> Result<StatsResponse> {
		let notes = self.store.list_all(ANALYSIS_SCAN_LIMIT).await?;
		let stats = analysis::stats(&notes);

		Ok(StatsResponse {
			note_count: stats.note_count,
			word_count: stats.word_count,
			project_count: stats.project_count,
		})
	}

	pub async fn keywords(&self, req: KeywordsRequest) -> Result<KeywordsResponse> {
		let top_n = req.top_n.unwrap_or(DEFAULT_TOP_N);

		if top_n == 0 {
			return Err(Error::InvalidRequest {
				message: "top_n must be greater than zero.".to_string(),
			});
		}

		let notes = self.store.list_all(ANALYSIS_SCAN_LIMIT).await?;
		let keywords = analysis::keywords(&notes, top_n)
			.into_iter()
			.map(|keyword| KeywordEntry { word: keyword.word, count: keyword.count })
			.collect();

		Ok(KeywordsResponse { keywords })
	}
}
