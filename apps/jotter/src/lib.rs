pub mod shell;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jotter_agent::{AgentRuntime, JotterTools};
use jotter_service::JotterService;
use jotter_store::{NoteStore, SessionStore};

#[derive(Debug, Parser)]
#[command(
	version = jotter_cli::VERSION,
	rename_all = "kebab",
	styles = jotter_cli::styles(),
)]
pub struct Args {
	/// Session name override; defaults to the configured session.
	#[arg(long, value_name = "NAME")]
	pub session: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	// Configuration is checked before anything else is reachable; every
	// missing variable is reported in one message.
	let cfg = jotter_config::load()?;

	init_tracing(&cfg);

	let store = NoteStore::new(&cfg.storage, cfg.providers.embedding.clone())?;

	store.ensure_collection().await?;

	let sessions = SessionStore::open(&cfg.storage.data_dir).await?;
	let session = args.session.unwrap_or_else(|| cfg.session.name.clone());
	let service = Arc::new(JotterService::new(cfg.clone(), store));
	let tools = Arc::new(JotterTools::new(service));
	let runtime = AgentRuntime::new(cfg, tools, sessions);

	shell::run(&runtime, &session).await
}

fn init_tracing(cfg: &jotter_config::Config) {
	let filter =
		EnvFilter::try_new(&cfg.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
