//! The command queue state machine
//!
//! Commands are enqueued until a target or a resolver is bound. From then on
//! every call enqueues and immediately drains the whole queue, in order.
//!
//! A pass that fails partway leaves the queue untouched: the entries that
//! were already dispatched in that pass are dispatched again on the next
//! flush. Callers relying on exactly-once delivery must make their commands
//! idempotent.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::QueueConfig;
use crate::descriptor::Descriptor;
use crate::error::{DispatchError, QueueError};
use crate::resolver::Resolver;
use crate::target::Target;
use crate::Result;

/// A queued command: descriptor plus positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<A> {
    descriptor: Descriptor,
    args: Vec<A>,
}

impl<A> Entry<A> {
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn args(&self) -> &[A] {
        &self.args
    }
}

/// Binding state of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Nothing bound yet; calls only enqueue.
    Unbound,
    /// A target or resolver is bound; calls enqueue and flush.
    Bound,
}

/// Buffers commands until a target is available, then replays them in order.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use cmdq_core::{CommandQueue, CommandTable};
///
/// let greeted = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&greeted);
///
/// let mut queue = CommandQueue::new();
/// queue.invoke("greet", vec!["hi".to_string()])?;
/// assert!(greeted.borrow().is_empty());
///
/// let target = CommandTable::new()
///     .command("greet", move |args: &[String]| {
///         sink.borrow_mut().extend_from_slice(args);
///         Ok(())
///     })
///     .unwrap();
/// queue.bind_target(Rc::new(target))?;
///
/// assert_eq!(*greeted.borrow(), vec!["hi".to_string()]);
/// assert!(queue.is_empty());
/// # Ok::<(), cmdq_core::QueueError>(())
/// ```
pub struct CommandQueue<A> {
    pending: Vec<Entry<A>>,
    target: Option<Rc<dyn Target<A>>>,
    resolver: Option<Box<dyn Resolver<A>>>,
    config: QueueConfig<A>,
}

impl<A> Default for CommandQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CommandQueue<A> {
    /// Create an unbound queue with the default configuration.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::new())
    }

    pub fn with_config(config: QueueConfig<A>) -> Self {
        Self {
            pending: Vec::new(),
            target: None,
            resolver: None,
            config,
        }
    }

    /// Enqueue a command, then flush if the queue is bound.
    ///
    /// An empty descriptor enqueues nothing and only triggers the flush,
    /// which is the same as calling [`CommandQueue::flush`].
    pub fn invoke(&mut self, descriptor: &str, args: Vec<A>) -> Result<()> {
        if !descriptor.is_empty() {
            let args = self.config.prepare(args);
            self.pending.push(Entry {
                descriptor: Descriptor::parse(descriptor),
                args,
            });
            debug!(descriptor = %descriptor, pending = self.pending.len(), "command enqueued");
        }

        self.flush()
    }

    /// Bind a single target for every entry, then flush.
    ///
    /// A bound target takes priority over any resolver, whatever target id
    /// the entries carry. Rebinding replaces the previous target.
    pub fn bind_target(&mut self, target: Rc<dyn Target<A>>) -> Result<()> {
        debug!(kind = "target", pending = self.pending.len(), "queue bound");
        self.target = Some(target);
        self.flush()
    }

    /// Bind a resolver that looks targets up by id, then flush.
    ///
    /// Rebinding replaces the previous resolver.
    pub fn bind_resolver<R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver<A> + 'static,
    {
        debug!(kind = "resolver", pending = self.pending.len(), "queue bound");
        self.resolver = Some(Box::new(resolver));
        self.flush()
    }

    /// Dispatch every pending entry in enqueue order.
    ///
    /// Does nothing while unbound. The queue is cleared only once every entry
    /// has been dispatched; on error the remaining pass is aborted and all
    /// entries stay pending.
    pub fn flush(&mut self) -> Result<()> {
        if self.state() == QueueState::Unbound {
            trace!(pending = self.pending.len(), "flush skipped, queue unbound");
            return Ok(());
        }
        if self.pending.is_empty() {
            return Ok(());
        }

        debug!(pending = self.pending.len(), "flushing queue");
        for (index, entry) in self.pending.iter().enumerate() {
            if let Err(err) = self.dispatch(entry) {
                debug!(
                    descriptor = %entry.descriptor,
                    index,
                    error = %err,
                    "flush aborted, entries kept pending"
                );
                return Err(err);
            }
        }

        let dispatched = self.pending.len();
        self.pending.clear();
        debug!(dispatched, "queue flushed");
        Ok(())
    }

    fn dispatch(&self, entry: &Entry<A>) -> Result<()> {
        let descriptor = &entry.descriptor;
        let target = self.resolve_target(descriptor)?;

        trace!(
            method = descriptor.method(),
            target_id = ?descriptor.target_id(),
            args = entry.args.len(),
            "dispatching command"
        );

        target
            .dispatch(descriptor.method(), &entry.args)
            .map_err(|err| match err {
                DispatchError::UnknownCommand => QueueError::UnresolvedMethod {
                    method: descriptor.method().to_string(),
                    descriptor: descriptor.to_string(),
                },
                DispatchError::Failed(source) => QueueError::Dispatch {
                    descriptor: descriptor.to_string(),
                    source,
                },
            })
    }

    fn resolve_target(&self, descriptor: &Descriptor) -> Result<Rc<dyn Target<A>>> {
        if let Some(target) = &self.target {
            return Ok(Rc::clone(target));
        }

        let resolver = self.resolver.as_ref().ok_or_else(|| QueueError::MissingTarget {
            descriptor: descriptor.to_string(),
        })?;

        resolver
            .resolve(descriptor.target_id())
            .map_err(|source| QueueError::Resolve {
                descriptor: descriptor.to_string(),
                source,
            })?
            .ok_or_else(|| QueueError::MissingTarget {
                descriptor: descriptor.to_string(),
            })
    }

    pub fn state(&self) -> QueueState {
        if self.target.is_some() || self.resolver.is_some() {
            QueueState::Bound
        } else {
            QueueState::Unbound
        }
    }

    pub fn is_bound(&self) -> bool {
        self.state() == QueueState::Bound
    }

    /// Number of entries waiting to be dispatched
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending entries in enqueue order
    pub fn pending(&self) -> impl Iterator<Item = &Entry<A>> {
        self.pending.iter()
    }

    pub fn config(&self) -> &QueueConfig<A> {
        &self.config
    }
}

impl<A> fmt::Debug for CommandQueue<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("state", &self.state())
            .field("pending", &self.pending.len())
            .field("target", &self.target.is_some())
            .field("resolver", &self.resolver.is_some())
            .field("config", &self.config)
            .finish()
    }
}
