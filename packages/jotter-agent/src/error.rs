pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Provider(#[from] jotter_providers::Error),
	#[error(transparent)]
	Store(#[from] jotter_store::Error),
}
