pub mod notes;
pub mod session;

mod error;

pub use error::Error;
pub use notes::{Embedder, HttpEmbedder, NoteStore};
pub use session::{SessionMessage, SessionStore};

use std::{future::Future, pin::Pin};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
