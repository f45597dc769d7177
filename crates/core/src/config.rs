//! Queue configuration

use std::fmt;

type CopyFn<A> = Box<dyn Fn(&[A]) -> Vec<A>>;

/// Options for a `CommandQueue`.
///
/// Without a copy function, arguments are stored as given. For argument
/// types that share state (`Rc<RefCell<_>>`, script values), mutations made
/// after `invoke` are visible when the entry is dispatched. Configure a copy
/// function to snapshot arguments at enqueue time instead.
pub struct QueueConfig<A> {
    copy: Option<CopyFn<A>>,
}

impl<A> Default for QueueConfig<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> QueueConfig<A> {
    pub fn new() -> Self {
        Self { copy: None }
    }

    /// Pass every enqueued argument list through `copy` before storing it.
    pub fn with_copy<F>(mut self, copy: F) -> Self
    where
        F: Fn(&[A]) -> Vec<A> + 'static,
    {
        self.copy = Some(Box::new(copy));
        self
    }

    pub fn has_copy(&self) -> bool {
        self.copy.is_some()
    }

    /// Apply the configured copy, or take the arguments as they are.
    pub(crate) fn prepare(&self, args: Vec<A>) -> Vec<A> {
        match &self.copy {
            Some(copy) => copy(&args),
            None => args,
        }
    }
}

impl<A: Clone + 'static> QueueConfig<A> {
    /// A config whose copy function clones each argument.
    pub fn cloning() -> Self {
        Self::new().with_copy(|args: &[A]| args.to_vec())
    }
}

impl<A> fmt::Debug for QueueConfig<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueConfig")
            .field("copy", &self.has_copy())
            .finish()
    }
}
