//! Error types for cmdq-lua

use thiserror::Error;

/// Errors that can occur while driving a queue from Lua
#[derive(Debug, Error)]
pub enum Error {
    #[error("Lua runtime error: {0}")]
    Lua(#[from] mlua::Error),

    #[error(transparent)]
    Queue(#[from] cmdq_core::QueueError),

    #[error("Invalid option '{name}': {message}")]
    InvalidOption { name: String, message: String },

    #[error("Command descriptor must be a string, got {0}")]
    InvalidDescriptor(String),

    #[error("Target must be a table or userdata, got {0}")]
    InvalidTarget(String),
}

/// Result type for cmdq-lua operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for mlua::Error {
    fn from(err: Error) -> Self {
        mlua::Error::external(err)
    }
}
