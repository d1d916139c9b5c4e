#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("Embedding error: {message}")]
	Embedding { message: String },
	#[error("Encode error: {message}")]
	Encode { message: String },
	#[error(transparent)]
	Qdrant(#[from] Box<qdrant_client::QdrantError>),
}
impl From<qdrant_client::QdrantError> for Error {
	fn from(err: qdrant_client::QdrantError) -> Self {
		Self::Qdrant(Box::new(err))
	}
}
impl From<jotter_providers::Error> for Error {
	fn from(err: jotter_providers::Error) -> Self {
		Self::Embedding { message: err.to_string() }
	}
}
