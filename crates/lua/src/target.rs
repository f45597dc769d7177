//! Lua values as command targets
//!
//! A target is a Lua table (or userdata) whose function-valued fields are the
//! commands. Lookup happens at dispatch time, so fields added after binding
//! are visible to later flushes.

use std::iter;
use std::rc::Rc;

use cmdq_core::{DispatchError, Resolver, Target};
use mlua::prelude::*;

use crate::error::{Error, Result};

/// How a command function is called relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Receiver {
    /// `f(...)`: the function does not receive the target.
    #[default]
    Detached,
    /// `f(target, ...)`: the target is passed first, like `target:f(...)`.
    Target,
}

/// A Lua table or userdata dispatched to by field name.
#[derive(Debug, Clone)]
pub struct LuaTarget {
    object: LuaValue,
    receiver: Receiver,
}

impl LuaTarget {
    pub fn new(object: LuaValue, receiver: Receiver) -> Result<Self> {
        match object {
            LuaValue::Table(_) | LuaValue::UserData(_) => Ok(Self { object, receiver }),
            other => Err(Error::InvalidTarget(other.type_name().to_string())),
        }
    }

    fn member(&self, name: &str) -> LuaResult<LuaValue> {
        match &self.object {
            LuaValue::Table(table) => table.get(name),
            // userdata without `__index` cannot be indexed at all
            LuaValue::UserData(userdata) => Ok(userdata.get(name).unwrap_or(LuaValue::Nil)),
            _ => Ok(LuaValue::Nil),
        }
    }
}

impl Target<LuaValue> for LuaTarget {
    fn dispatch(&self, method: &str, args: &[LuaValue]) -> std::result::Result<(), DispatchError> {
        let member = self.member(method).map_err(anyhow::Error::from)?;
        let LuaValue::Function(func) = member else {
            return Err(DispatchError::UnknownCommand);
        };

        let call_args: LuaMultiValue = match self.receiver {
            Receiver::Detached => args.iter().cloned().collect(),
            Receiver::Target => iter::once(self.object.clone())
                .chain(args.iter().cloned())
                .collect(),
        };

        func.call::<()>(call_args).map_err(anyhow::Error::from)?;
        Ok(())
    }
}

/// A Lua function `function(id) -> target|nil` used to look targets up.
///
/// `id` is `nil` when the descriptor has no `:` suffix.
#[derive(Debug, Clone)]
pub struct LuaResolver {
    func: LuaFunction,
    receiver: Receiver,
}

impl LuaResolver {
    pub fn new(func: LuaFunction, receiver: Receiver) -> Self {
        Self { func, receiver }
    }
}

impl Resolver<LuaValue> for LuaResolver {
    fn resolve(&self, id: Option<&str>) -> anyhow::Result<Option<Rc<dyn Target<LuaValue>>>> {
        let found: LuaValue = self.func.call(id)?;
        if found.is_nil() {
            return Ok(None);
        }

        let target: Rc<dyn Target<LuaValue>> = Rc::new(LuaTarget::new(found, self.receiver)?);
        Ok(Some(target))
    }
}
