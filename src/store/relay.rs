//! Hot, replay-last observable value.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use super::StoreError;

type Callback<T> = Rc<dyn Fn(&T)>;
type SubscriberList<T> = RefCell<Vec<(u64, Callback<T>)>>;

/// Holds a current value and pushes every new value to its subscribers.
///
/// New subscribers are called with the current value straight away, then
/// again after each [`Relay::accept`]. Delivery is synchronous, on the
/// calling thread, in subscription order.
pub struct Relay<T> {
    value: RefCell<T>,
    subscribers: Rc<SubscriberList<T>>,
    next_id: Cell<u64>,
    broadcasting: Cell<bool>,
}

impl<T: Clone + 'static> Relay<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
            broadcasting: Cell::new(false),
        }
    }

    pub fn value(&self) -> T { self.value.borrow().clone() }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R { f(&self.value.borrow()) }

    pub fn is_broadcasting(&self) -> bool { self.broadcasting.get() }

    pub fn subscriber_count(&self) -> usize { self.subscribers.borrow().len() }

    /// Register `f` and call it once with the current value.
    ///
    /// The returned guard unsubscribes when dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let callback: Callback<T> = Rc::new(f);
        self.subscribers.borrow_mut().push((id, Rc::clone(&callback)));

        let current = self.value();
        callback(&current);

        let weak: Weak<SubscriberList<T>> = Rc::downgrade(&self.subscribers);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(list) = weak.upgrade() {
                    list.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Fail with [`StoreError::Reentrant`] if a broadcast is running.
    pub fn ensure_idle(&self) -> Result<(), StoreError> {
        if self.broadcasting.get() { Err(StoreError::Reentrant) } else { Ok(()) }
    }

    /// Replace the value and notify every subscriber.
    pub fn accept(&self, value: T) -> Result<(), StoreError> {
        self.ensure_idle()?;
        *self.value.borrow_mut() = value;

        // Snapshot the list so callbacks may subscribe or unsubscribe freely.
        let targets: Vec<Callback<T>> = self.subscribers.borrow().iter().map(|(_, cb)| Rc::clone(cb)).collect();
        let current = self.value();
        self.broadcasting.set(true);
        let _reset = ResetOnDrop(&self.broadcasting);
        for callback in targets {
            callback(&current);
        }
        Ok(())
    }
}

struct ResetOnDrop<'a>(&'a Cell<bool>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) { self.0.set(false); }
}

/// Guard returned by [`Relay::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Stop receiving values now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() { cancel(); }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() { cancel(); }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}
