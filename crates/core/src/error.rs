//! Error types for cmdq-core

use thiserror::Error;

/// Errors that abort a flush pass
///
/// Every variant leaves the pending entries in place, so the whole queue is
/// dispatched again on the next flush.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Target has no command '{method}' (descriptor '{descriptor}')")]
    UnresolvedMethod { method: String, descriptor: String },

    #[error("No target resolved for descriptor '{descriptor}'")]
    MissingTarget { descriptor: String },

    #[error("Resolver failed for descriptor '{descriptor}': {source}")]
    Resolve {
        descriptor: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Command '{descriptor}' failed: {source}")]
    Dispatch {
        descriptor: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Outcome of a single dispatch that did not succeed
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown command")]
    UnknownCommand,

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Errors raised while registering commands on a `CommandTable`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Command name must not be empty")]
    EmptyName,

    #[error("Command name '{0}' must not contain ':'")]
    ReservedSeparator(String),

    #[error("Command '{0}' is already registered")]
    Duplicate(String),
}
