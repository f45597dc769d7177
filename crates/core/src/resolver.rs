//! Lazy target lookup by id.

use std::rc::Rc;

use crate::target::Target;

/// Maps the target id of a descriptor to a target.
///
/// `id` is `None` when the descriptor had no `:` suffix. Returning
/// `Ok(None)` means no target is known for the id, which fails the dispatch
/// of that entry.
pub trait Resolver<A> {
    fn resolve(&self, id: Option<&str>) -> anyhow::Result<Option<Rc<dyn Target<A>>>>;
}

impl<A, F> Resolver<A> for F
where
    F: Fn(Option<&str>) -> Option<Rc<dyn Target<A>>>,
{
    fn resolve(&self, id: Option<&str>) -> anyhow::Result<Option<Rc<dyn Target<A>>>> {
        Ok(self(id))
    }
}
