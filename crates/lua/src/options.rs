//! Options accepted by `cmdq.new{}`
//!
//! ```lua
//! local q = cmdq.new {
//!     copy = "shallow",        -- or function(entry) return copied_entry end
//!     bind_receiver = false,   -- pass the target as the first argument
//! }
//! ```

use std::iter;

use mlua::prelude::*;

use crate::error::{Error, Result};
use crate::target::Receiver;

const SHALLOW: &str = "shallow";

/// How enqueued commands are copied before they are stored.
#[derive(Debug, Clone)]
pub enum ArgCopy {
    /// Table arguments are copied one level deep; other values are kept.
    Shallow,
    /// A Lua function receiving the whole entry as a packed list
    /// (`{ n = count, descriptor, ... }`) and returning the list to store.
    /// The first element of the returned list is the stored descriptor.
    Function(LuaFunction),
}

impl ArgCopy {
    /// Copy one entry, returning the descriptor and arguments to store.
    pub fn apply(
        &self,
        lua: &Lua,
        descriptor: String,
        args: Vec<LuaValue>,
    ) -> Result<(String, Vec<LuaValue>)> {
        match self {
            ArgCopy::Shallow => {
                let args = args
                    .into_iter()
                    .map(|arg| match arg {
                        LuaValue::Table(table) => shallow_copy(lua, &table).map(LuaValue::Table),
                        other => Ok(other),
                    })
                    .collect::<LuaResult<_>>()?;
                Ok((descriptor, args))
            }
            ArgCopy::Function(func) => {
                let entry = iter::once(LuaValue::String(lua.create_string(&descriptor)?)).chain(args);
                let packed = pack(lua, entry)?;
                let copied: LuaTable = func.call(packed).context("copy function failed")?;

                let mut entry = unpack(&copied)?.into_iter();
                let descriptor = match entry.next() {
                    Some(LuaValue::String(s)) => s.to_str()?.to_string(),
                    Some(other) => return Err(Error::InvalidDescriptor(other.type_name().to_string())),
                    None => return Err(Error::InvalidDescriptor("nil".to_string())),
                };
                if descriptor.is_empty() {
                    return Err(Error::InvalidDescriptor("an empty string".to_string()));
                }
                Ok((descriptor, entry.collect()))
            }
        }
    }
}

/// Parsed queue options.
#[derive(Debug, Clone, Default)]
pub struct QueueOptions {
    pub copy: Option<ArgCopy>,
    pub receiver: Receiver,
}

impl QueueOptions {
    /// Parse an options table. A missing table gives the defaults.
    pub fn from_table(table: Option<&LuaTable>) -> Result<Self> {
        let Some(table) = table else {
            return Ok(Self::default());
        };

        let copy = match table.get::<LuaValue>("copy")? {
            LuaValue::Nil => None,
            LuaValue::Function(func) => Some(ArgCopy::Function(func)),
            LuaValue::String(s) if &*s.to_str()? == SHALLOW => Some(ArgCopy::Shallow),
            other => {
                return Err(Error::InvalidOption {
                    name: "copy".to_string(),
                    message: format!(
                        "expected a function or \"{}\", got {}",
                        SHALLOW,
                        describe(&other)
                    ),
                });
            }
        };

        let receiver = match table.get::<LuaValue>("bind_receiver")? {
            LuaValue::Nil | LuaValue::Boolean(false) => Receiver::Detached,
            LuaValue::Boolean(true) => Receiver::Target,
            other => {
                return Err(Error::InvalidOption {
                    name: "bind_receiver".to_string(),
                    message: format!("expected a boolean, got {}", describe(&other)),
                });
            }
        };

        Ok(Self { copy, receiver })
    }
}

fn describe(value: &LuaValue) -> String {
    match value {
        LuaValue::String(s) => format!("\"{}\"", s.to_string_lossy()),
        other => other.type_name().to_string(),
    }
}

fn shallow_copy(lua: &Lua, table: &LuaTable) -> LuaResult<LuaTable> {
    let copy = lua.create_table()?;
    for pair in table.pairs::<LuaValue, LuaValue>() {
        let (key, value) = pair?;
        copy.raw_set(key, value)?;
    }
    Ok(copy)
}

fn pack(lua: &Lua, values: impl Iterator<Item = LuaValue>) -> LuaResult<LuaTable> {
    let packed = lua.create_table()?;
    let mut count = 0;
    for value in values {
        count += 1;
        packed.raw_set(count, value)?;
    }
    packed.raw_set("n", count)?;
    Ok(packed)
}

fn unpack(packed: &LuaTable) -> LuaResult<Vec<LuaValue>> {
    let count = match packed.raw_get::<Option<usize>>("n")? {
        Some(n) => n,
        None => packed.raw_len(),
    };
    (1..=count).map(|i| packed.raw_get(i)).collect()
}
