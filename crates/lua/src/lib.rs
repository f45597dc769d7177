//! cmdq-lua: Command queues for Lua
//!
//! This crate exposes `cmdq_core::CommandQueue` to Lua code:
//! - `LuaTarget`: a Lua table or userdata whose function fields are commands
//! - `LuaResolver`: a Lua function mapping a target id to a target
//! - `LuaCommandQueue`: the queue as a callable userdata with
//!   `bind_target` / `bind_resolver`
//! - `create_module()` / `register_preload()`: the `cmdq` module with `new{}`
//!
//! Nothing is registered globally unless the embedder asks for it with
//! `register_global()`.

mod error;
mod module;
mod options;
mod queue;
mod target;

pub use error::{Error, Result};
pub use module::{MODULE_NAME, create_command_queue, create_module, register_global, register_preload};
pub use options::{ArgCopy, QueueOptions};
pub use queue::LuaCommandQueue;
pub use target::{LuaResolver, LuaTarget, Receiver};
