pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Missing required environment variables: {}.", keys.join(", "))]
	MissingEnv { keys: Vec<String> },
	#[error("{message}")]
	Validation { message: String },
}
