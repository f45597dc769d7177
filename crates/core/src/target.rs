//! Target capability contract
//!
//! A target is anything that can run a named command with positional
//! arguments. `CommandTable` is the registry-backed implementation: commands
//! are registered up front and validated at registration time, so dispatch is
//! a plain map lookup.

use std::collections::HashMap;
use std::fmt;

use crate::error::{DispatchError, RegistrationError};

/// Something commands can be dispatched to.
///
/// Dispatch is receiver-detached: the target only sees the method name and
/// the arguments stored with the entry.
pub trait Target<A> {
    /// Run `method` with `args`.
    ///
    /// Returns `DispatchError::UnknownCommand` when the target has no such
    /// command, or `DispatchError::Failed` when the command itself failed.
    fn dispatch(&self, method: &str, args: &[A]) -> Result<(), DispatchError>;
}

type Handler<A> = Box<dyn Fn(&[A]) -> anyhow::Result<()>>;

/// A target backed by a map of registered command handlers.
pub struct CommandTable<A> {
    commands: HashMap<String, Handler<A>>,
}

impl<A> Default for CommandTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CommandTable<A> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command handler.
    ///
    /// Names must be non-empty, unique, and free of `:` (which would make the
    /// command unreachable from a descriptor).
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), RegistrationError>
    where
        F: Fn(&[A]) -> anyhow::Result<()> + 'static,
    {
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        if name.contains(':') {
            return Err(RegistrationError::ReservedSeparator(name.to_string()));
        }
        if self.commands.contains_key(name) {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }

        self.commands.insert(name.to_string(), Box::new(handler));
        Ok(())
    }

    /// Builder form of [`CommandTable::register`].
    ///
    /// ```
    /// use cmdq_core::CommandTable;
    ///
    /// let table = CommandTable::<i64>::new()
    ///     .command("add", |_args| Ok(()))?
    ///     .command("sub", |_args| Ok(()))?;
    /// assert!(table.contains("add"));
    /// # Ok::<(), cmdq_core::RegistrationError>(())
    /// ```
    pub fn command<F>(mut self, name: &str, handler: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&[A]) -> anyhow::Result<()> + 'static,
    {
        self.register(name, handler)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<A> Target<A> for CommandTable<A> {
    fn dispatch(&self, method: &str, args: &[A]) -> Result<(), DispatchError> {
        let handler = self
            .commands
            .get(method)
            .ok_or(DispatchError::UnknownCommand)?;
        handler(args)?;
        Ok(())
    }
}

impl<A> fmt::Debug for CommandTable<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.names())
            .finish()
    }
}
