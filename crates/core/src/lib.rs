//! cmdq-core: Deferred command queue
//!
//! This crate buffers commands issued against a target that is not available
//! yet and replays them, in order, once the target is bound:
//! - `CommandQueue`: the queue state machine (enqueue, bind, flush)
//! - `Descriptor`: parsed `method` / `method:targetId` command descriptors
//! - `Target` / `CommandTable`: the capability contract commands dispatch to
//! - `Resolver`: lazy lookup of a target by id

mod config;
mod descriptor;
mod error;
mod queue;
mod resolver;
mod target;

pub use config::QueueConfig;
pub use descriptor::Descriptor;
pub use error::{DispatchError, QueueError, RegistrationError};
pub use queue::{CommandQueue, Entry, QueueState};
pub use resolver::Resolver;
pub use target::{CommandTable, Target};

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
