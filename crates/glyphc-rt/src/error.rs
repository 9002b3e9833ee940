//! Errors from standing up or driving the JIT.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not create a JIT execution engine: {0}")]
    EngineUnavailable(String),

    #[error("no '{0}' function in the compiled module")]
    EntryNotFound(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
