//! Synchronous, in-order listener registry.
//!
//! [`Emitter`] is generic over the context handed to listeners so that the
//! owner can pass itself: a [`Cache`](crate::Cache) keeps an
//! `Emitter<Cache>` and listeners receive `&mut Cache`, which lets them call
//! back into the store while an event is being delivered.
//!
//! Delivery works on a snapshot. Listeners added during an emission first
//! see the next one; a listener that is already running is skipped if its
//! own work raises the same event again.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::CacheResult;
use crate::event::{Event, EventKind};

/// Callback signature for event listeners.
pub type Listener<C> = dyn FnMut(&mut C, &Event) -> CacheResult<()>;

type SharedListener<C> = Rc<RefCell<Listener<C>>>;

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Registration<C> {
    id: ListenerId,
    kind: EventKind,
    once: bool,
    listener: SharedListener<C>,
}

/// A batch of listeners captured for one emission.
pub struct Delivery<C> {
    listeners: Vec<SharedListener<C>>,
}

impl<C> Delivery<C> {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every captured listener in registration order.
    ///
    /// The first listener error stops delivery and is returned; the
    /// remaining listeners are not called.
    pub fn deliver(self, ctx: &mut C, event: &Event) -> CacheResult<()> {
        for listener in self.listeners {
            let Ok(mut callback) = listener.try_borrow_mut() else {
                trace!(kind = %event.kind(), "skipping listener already on the stack");
                continue;
            };
            if let Err(err) = (&mut *callback)(ctx, event) {
                debug!(kind = %event.kind(), error = %err, "listener failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Listener registry keyed by [`EventKind`].
pub struct Emitter<C> {
    registrations: Vec<Registration<C>>,
    next_id: u64,
}

impl<C> Emitter<C> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            next_id: 1,
        }
    }

    /// Subscribe `listener` to every future emission of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &Event) -> CacheResult<()> + 'static,
    {
        self.register(kind, false, listener)
    }

    /// Subscribe `listener` to the next emission of `kind` only.
    pub fn once<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &Event) -> CacheResult<()> + 'static,
    {
        self.register(kind, true, listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Remove every listener for `kind`, returning how many were removed.
    pub fn off_all(&mut self, kind: EventKind) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.kind != kind);
        before - self.registrations.len()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registrations.iter().filter(|r| r.kind == kind).count()
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.registrations.iter().any(|r| r.kind == kind)
    }

    /// Capture the listeners for `kind`, consuming `once` registrations.
    pub fn prepare(&mut self, kind: EventKind) -> Delivery<C> {
        let listeners = self
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| Rc::clone(&r.listener))
            .collect();
        self.registrations.retain(|r| !(r.once && r.kind == kind));
        Delivery { listeners }
    }

    fn register<F>(&mut self, kind: EventKind, once: bool, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &Event) -> CacheResult<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let listener: SharedListener<C> = Rc::new(RefCell::new(listener));
        self.registrations.push(Registration {
            id,
            kind,
            once,
            listener,
        });
        trace!(kind = %kind, id = id.0, "listener registered");
        id
    }
}

impl<C> Default for Emitter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Emitter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listener_count", &self.registrations.len())
            .finish()
    }
}
