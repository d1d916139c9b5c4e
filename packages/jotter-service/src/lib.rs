pub mod add;
pub mod delete;
pub mod list;
pub mod notes;
pub mod search;
pub mod stats;
pub mod update;

mod error;

pub use add::{AddRequest, AddResponse};
pub use delete::{DeleteRequest, DeleteResponse};
pub use error::{Error, Result};
pub use list::{ListItem, ListRequest, ListResponse, ProjectFilterRequest};
pub use notes::{NoteDetails, NoteFetchRequest, NoteFetchResponse};
pub use search::{SearchItem, SearchRequest, SearchResponse};
pub use stats::{KeywordEntry, KeywordsRequest, KeywordsResponse, StatsResponse};
pub use update::{NoteOp, UpdateRequest, UpdateResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use jotter_config::Config;
use jotter_store::NoteStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait RerankProvider
where
	Self: Send + Sync,
{
	fn rerank<'a>(
		&'a self,
		cfg: &'a jotter_config::RerankConfig,
		query: &'a str,
		docs: &'a [String],
	) -> BoxFuture<'a, jotter_providers::Result<Vec<f32>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub rerank: Arc<dyn RerankProvider>,
}

struct DefaultProviders;

impl RerankProvider for DefaultProviders {
	fn rerank<'a>(
		&'a self,
		cfg: &'a jotter_config::RerankConfig,
		query: &'a str,
		docs: &'a [String],
	) -> BoxFuture<'a, jotter_providers::Result<Vec<f32>>> {
		Box::pin(jotter_providers::rerank::rerank(cfg, query, docs))
	}
}

impl Providers {
	pub fn new(rerank: Arc<dyn RerankProvider>) -> Self {
		Self { rerank }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { rerank: Arc::new(DefaultProviders) }
	}
}

pub struct JotterService {
	pub cfg: Config,
	pub store: NoteStore,
	pub providers: Providers,
}
impl JotterService {
	pub fn new(cfg: Config, store: NoteStore) -> Self {
		Self { cfg, store, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, store: NoteStore, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}
}
