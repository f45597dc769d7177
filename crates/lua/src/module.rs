//! The `cmdq` Lua module
//!
//! Usage from Lua, once `register_preload()` has run:
//! ```lua
//! local cmdq = require("cmdq")
//! local q = cmdq.new { copy = "shallow" }
//! ```

use mlua::prelude::*;
use tracing::debug;

use crate::options::QueueOptions;
use crate::queue::LuaCommandQueue;

/// Name the module is preloaded under
pub const MODULE_NAME: &str = "cmdq";

/// Create a command queue userdata from an optional options table.
pub fn create_command_queue(lua: &Lua, options: Option<LuaTable>) -> LuaResult<LuaAnyUserData> {
    let options = QueueOptions::from_table(options.as_ref())?;
    debug!(
        copy = options.copy.is_some(),
        receiver = ?options.receiver,
        "creating command queue"
    );
    lua.create_userdata(LuaCommandQueue::new(options))
}

/// Build the module table: `{ new = function(options) ... end }`.
pub fn create_module(lua: &Lua) -> LuaResult<LuaTable> {
    let module = lua.create_table()?;
    module.set(
        "new",
        lua.create_function(|lua, options: Option<LuaTable>| create_command_queue(lua, options))?,
    )?;
    Ok(module)
}

/// Make `require("cmdq")` return the module table.
pub fn register_preload(lua: &Lua) -> LuaResult<()> {
    let package: LuaTable = lua.globals().get("package")?;
    let preload: LuaTable = package.get("preload")?;
    preload.set(MODULE_NAME, lua.create_function(|lua, ()| create_module(lua))?)?;
    Ok(())
}

/// Expose the module table as the global `name`.
///
/// Loading the crate never touches globals; embedders that want a global
/// factory call this explicitly.
pub fn register_global(lua: &Lua, name: &str) -> LuaResult<()> {
    lua.globals().set(name, create_module(lua)?)?;
    debug!(name, "registered cmdq global");
    Ok(())
}
