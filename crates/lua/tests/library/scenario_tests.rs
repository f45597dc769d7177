use mlua::prelude::*;

use super::common::create_test_runtime;

#[test]
fn single_command_dispatched_on_bind() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                q('greet', 'hi')
                assert(#calls == 0, 'nothing should run before bind')
                q:bind_target({ greet = record('f') })
                assert(joined() == 'f(hi)', joined())
                assert(#q == 0, 'queue should be drained')
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn commands_replay_in_enqueue_order() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                q('a', 1)
                q('b', 2)
                q('a', 3, 4)
                q:bind_target({ a = record('a'), b = record('b') })
                assert(joined() == 'a(1) b(2) a(3,4)', joined())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn bound_queue_dispatches_immediately() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                q:bind_target({ ping = record('ping') })
                q('ping', 'x')
                assert(joined() == 'ping(x)', joined())
                q('ping', 'y')
                assert(joined() == 'ping(x) ping(y)', joined())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn flush_without_descriptor_is_noop_when_unbound() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                q()
                q('')
                assert(#q == 0, 'no entry should be queued')
                q('a')
                q()
                assert(#q == 1 and not q:is_bound())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn rebinding_replaces_target() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                q:bind_target({ a = record('first') })
                q:bind_target({ a = record('second') })
                q('a', 1)
                assert(joined() == 'second(1)', joined())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn receiver_is_detached_by_default() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                local plugin = { name = 'plugin' }
                function plugin.who(first) plugin.got = first end
                q('who', 'arg')
                q:bind_target(plugin)
                assert(plugin.got == 'arg', 'the first argument should not be the target')
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn bind_receiver_passes_target_as_self() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new({ bind_receiver = true })
                local plugin = { name = 'plugin' }
                function plugin:hello(suffix) self.greeting = self.name .. suffix end
                q('hello', '!')
                q:bind_target(plugin)
                assert(plugin.greeting == 'plugin!', tostring(plugin.greeting))
            "#,
        )
        .exec()?;

    Ok(())
}
