//! The command queue as a Lua userdata
//!
//! From Lua the queue is a callable value:
//!
//! ```lua
//! local q = cmdq.new()
//! q("send", "/test", data)          -- queued until a target is bound
//! q:bind_target(plugin)             -- plugin.send("/test", data)
//!
//! q("send:1234", "/test", data)     -- routed by id once a resolver is bound
//! q:bind_resolver(function(id) return plugins[id] end)
//! ```
//!
//! Calling the queue from inside one of its own commands while it is
//! flushing raises an error, since the queue is borrowed for the flush.

use std::rc::Rc;

use cmdq_core::CommandQueue;
use mlua::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::QueueOptions;
use crate::target::{LuaResolver, LuaTarget};

/// A command queue holding Lua values, driven from Lua.
pub struct LuaCommandQueue {
    queue: CommandQueue<LuaValue>,
    options: QueueOptions,
}

impl LuaCommandQueue {
    pub fn new(options: QueueOptions) -> Self {
        Self {
            queue: CommandQueue::new(),
            options,
        }
    }

    /// Handle `q(descriptor, ...)`.
    ///
    /// `nil`/`false` (or an empty string) only flushes. Copying, when
    /// configured, happens here because it needs the Lua state.
    pub fn call(&mut self, lua: &Lua, descriptor: LuaValue, args: Vec<LuaValue>) -> Result<()> {
        let descriptor = match descriptor {
            LuaValue::Nil | LuaValue::Boolean(false) => return Ok(self.queue.flush()?),
            LuaValue::String(s) => s.to_str()?.to_string(),
            other => return Err(Error::InvalidDescriptor(other.type_name().to_string())),
        };
        if descriptor.is_empty() {
            return Ok(self.queue.flush()?);
        }

        let (descriptor, args) = match &self.options.copy {
            Some(copy) => copy.apply(lua, descriptor, args)?,
            None => (descriptor, args),
        };
        self.queue.invoke(&descriptor, args)?;
        Ok(())
    }

    pub fn bind_target(&mut self, object: LuaValue) -> Result<()> {
        let target = LuaTarget::new(object, self.options.receiver)?;
        debug!(receiver = ?self.options.receiver, "binding Lua target");
        self.queue.bind_target(Rc::new(target))?;
        Ok(())
    }

    pub fn bind_resolver(&mut self, func: LuaFunction) -> Result<()> {
        debug!(receiver = ?self.options.receiver, "binding Lua resolver");
        self.queue
            .bind_resolver(LuaResolver::new(func, self.options.receiver))?;
        Ok(())
    }

    pub fn queue(&self) -> &CommandQueue<LuaValue> {
        &self.queue
    }
}

impl LuaUserData for LuaCommandQueue {
    fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method_mut(
            LuaMetaMethod::Call,
            |lua, this, (descriptor, args): (LuaValue, LuaVariadic<LuaValue>)| {
                Ok(this.call(lua, descriptor, args.iter().cloned().collect())?)
            },
        );

        methods.add_meta_method(LuaMetaMethod::Len, |_, this, ()| Ok(this.queue.len()));

        methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
            Ok(format!(
                "CommandQueue(pending={}, bound={})",
                this.queue.len(),
                this.queue.is_bound()
            ))
        });

        // `init` / `init_getter` are the names plugin loaders commonly use
        for name in ["bind_target", "init"] {
            methods.add_method_mut(name, |_, this, object: LuaValue| {
                Ok(this.bind_target(object)?)
            });
        }

        for name in ["bind_resolver", "init_getter"] {
            methods.add_method_mut(name, |_, this, func: LuaFunction| {
                Ok(this.bind_resolver(func)?)
            });
        }

        methods.add_method("len", |_, this, ()| Ok(this.queue.len()));
        methods.add_method("is_bound", |_, this, ()| Ok(this.queue.is_bound()));
    }
}
