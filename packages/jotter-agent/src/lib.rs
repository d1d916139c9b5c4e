pub mod runtime;
pub mod tools;

mod error;

pub use error::{Error, Result};
pub use runtime::{AgentRuntime, ChatProvider};
pub use tools::{JotterTools, ToolError, ToolHandler};

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
