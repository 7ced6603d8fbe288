//! Ordered, synchronous listener lists.
//!
//! Listeners are invoked in registration order on the caller's stack. A
//! listener may filter on an event key; unfiltered listeners see everything.
//! Subscribing hands back a [`Subscription`] token, and calling
//! [`Subscription::unsubscribe`] on it removes exactly that listener.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

/// An event that can be filtered by a key.
pub trait Keyed {
    type Key: Copy + PartialEq + 'static;

    fn key(&self) -> Self::Key;
}

type Callback<E> = Rc<dyn Fn(&E)>;

struct Listener<E: Keyed> {
    id: u64,
    filter: Option<E::Key>,
    callback: Callback<E>,
}

struct Registry<E: Keyed> {
    next_id: u64,
    listeners: Vec<Listener<E>>,
}

trait Detach {
    fn detach(&self, id: u64) -> bool;
}

impl<E: Keyed> Detach for RefCell<Registry<E>> {
    fn detach(&self, id: u64) -> bool {
        let mut registry = self.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|listener| listener.id != id);
        registry.listeners.len() != before
    }
}

/// A list of listeners for events of type `E`.
pub struct EventBus<E: Keyed + 'static> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: Keyed + 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers `callback` for events whose key equals `filter`, or for all events when `None`.
    pub fn subscribe(&self, filter: Option<E::Key>, callback: impl Fn(&E) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.listeners.push(Listener {
            id,
            filter,
            callback: Rc::new(callback),
        });

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription { id, registry: weak }
    }

    /// Invokes every matching listener, in registration order.
    ///
    /// The listener list is copied first, so a listener may subscribe or
    /// unsubscribe while being invoked; such changes apply to the next emit.
    pub fn emit(&self, event: &E) {
        let key = event.key();
        let callbacks: SmallVec<[Callback<E>; 8]> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.filter.is_none_or(|filter| filter == key))
            .map(|listener| Rc::clone(&listener.callback))
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

impl<E: Keyed + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Keyed + 'static> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// The capability to remove one listener.
///
/// Dropping the token leaves the listener registered.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Detach>,
}

impl Subscription {
    /// Removes the listener. Returns `false` if it was already gone or the bus was dropped.
    pub fn unsubscribe(self) -> bool {
        self.registry.upgrade().is_some_and(|registry| registry.detach(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
