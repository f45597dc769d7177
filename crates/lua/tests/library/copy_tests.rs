use mlua::prelude::*;

use super::common::create_test_runtime;

#[test]
fn without_copy_mutation_is_observed() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new()
                local data = { value = 1 }
                local seen
                q('read', data)
                data.value = 2
                q:bind_target({ read = function(d) seen = d.value end })
                assert(seen == 2, 'arguments are stored by reference')
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn shallow_copy_snapshots_table_arguments() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new({ copy = 'shallow' })
                local data = { value = 1, nested = { value = 1 } }
                local seen, nested
                q('read', data)
                data.value = 2
                data.nested.value = 2
                q:bind_target({ read = function(d) seen, nested = d.value, d.nested.value end })
                assert(seen == 1, 'top level should be copied')
                assert(nested == 2, 'nested tables are shared by a shallow copy')
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn custom_copy_function_receives_packed_entry() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local packed_n
                local function copy(entry)
                    packed_n = entry.n
                    local out = { n = entry.n }
                    for i = 1, entry.n do
                        local arg = entry[i]
                        if type(arg) == 'table' then
                            local c = {}
                            for k, v in pairs(arg) do c[k] = v end
                            arg = c
                        end
                        out[i] = arg
                    end
                    return out
                end

                local q = require('cmdq').new({ copy = copy })
                local data = { value = 1 }
                q('read', data, nil, 'tail')
                assert(packed_n == 4, 'copy should see the descriptor and every argument, got ' .. tostring(packed_n))
                data.value = 2
                q:bind_target({ read = function(d, missing, tail)
                    assert(d.value == 1)
                    assert(missing == nil)
                    assert(tail == 'tail')
                    record('read')(d.value, tail)
                end })
                assert(joined() == 'read(1,tail)', joined())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn copy_function_sees_descriptor_first() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    let first: String = lua
        .load(
            r#"
                local first
                local q = require('cmdq').new({
                    copy = function(entry)
                        first = entry[1]
                        return entry
                    end,
                })
                q('send:42', '/p')
                return first
            "#,
        )
        .eval()?;

    assert_eq!(first, "send:42");
    Ok(())
}

#[test]
fn copy_function_can_rewrite_descriptor() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new({
                    copy = function(entry)
                        return { n = entry.n, 'b', table.unpack(entry, 2, entry.n) }
                    end,
                })
                q('a', 1, 2)
                q:bind_target({ a = record('a'), b = record('b') })
                assert(joined() == 'b(1,2)', joined())
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn copy_function_returning_bad_descriptor_raises() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local q = require('cmdq').new({ copy = function(entry) return { n = 1, 42 } end })
                local ok, err = pcall(q, 'a', 1)
                assert(not ok, 'expected an error')
                assert(tostring(err):find('Command descriptor must be a string, got integer', 1, true), tostring(err))
                assert(#q == 0, 'nothing should be enqueued')
            "#,
        )
        .exec()?;

    Ok(())
}

#[test]
fn copy_is_skipped_for_flush_only_calls() -> LuaResult<()> {
    let lua = create_test_runtime()?;

    lua
        .load(
            r#"
                local copies = 0
                local q = require('cmdq').new({ copy = function(args) copies = copies + 1 return args end })
                q()
                q(nil, 'ignored')
                q('a', 1)
                assert(copies == 1, 'copy should run once per enqueued command')
            "#,
        )
        .exec()?;

    Ok(())
}
