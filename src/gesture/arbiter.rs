//! Gesture arbitration between recognizers sharing one pointer
//!
//! Every recognizer that may claim the pointer registers here. The first one
//! to activate wins; a later one may only activate alongside it when the two
//! were declared simultaneous. A handler stays active until its owner
//! deactivates it, so the host can ask which handlers are engaged and cancel
//! them.
//!
//! [`SimultaneousHandlers`] is a cheap cloneable handle to one arbiter,
//! handed down from the list to each of its rows. Everything runs on the UI
//! thread, so it is not `Send`.

use super::recognizer::Axis;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use uuid::Uuid;

pub type HandlerId = Uuid;

#[derive(Debug, Clone, Copy)]
struct HandlerEntry {
    axis: Axis,
    active: bool,
}

#[derive(Debug, Default)]
struct GestureArbiter {
    handlers: HashMap<HandlerId, HandlerEntry>,
    simultaneous: HashSet<(HandlerId, HandlerId)>,
}

impl GestureArbiter {
    fn pair(a: HandlerId, b: HandlerId) -> (HandlerId, HandlerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn is_simultaneous(&self, a: HandlerId, b: HandlerId) -> bool {
        self.simultaneous.contains(&Self::pair(a, b))
    }

    /// Active handlers that would block `id`
    fn blockers(&self, id: HandlerId) -> Vec<HandlerId> {
        self.handlers
            .iter()
            .filter(|(other, entry)| **other != id && entry.active && !self.is_simultaneous(id, **other))
            .map(|(other, _)| *other)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimultaneousHandlers {
    inner: Rc<RefCell<GestureArbiter>>,
}

impl SimultaneousHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, axis: Axis) -> HandlerId {
        let id = Uuid::new_v4();
        self.inner
            .borrow_mut()
            .handlers
            .insert(id, HandlerEntry { axis, active: false });
        log::debug!("Registered {:?} gesture handler {}", axis, id);
        id
    }

    pub fn unregister(&self, id: HandlerId) {
        let mut arbiter = self.inner.borrow_mut();
        arbiter.handlers.remove(&id);
        arbiter.simultaneous.retain(|(a, b)| *a != id && *b != id);
    }

    /// Let `a` and `b` be active at the same time
    pub fn allow_simultaneous(&self, a: HandlerId, b: HandlerId) {
        if a != b {
            self.inner.borrow_mut().simultaneous.insert(GestureArbiter::pair(a, b));
        }
    }

    pub fn is_simultaneous(&self, a: HandlerId, b: HandlerId) -> bool {
        self.inner.borrow().is_simultaneous(a, b)
    }

    /// Activate `id` unless a non-simultaneous handler is already active.
    pub fn try_activate(&self, id: HandlerId) -> bool {
        let mut arbiter = self.inner.borrow_mut();
        if !arbiter.handlers.contains_key(&id) || !arbiter.blockers(id).is_empty() {
            return false;
        }
        if let Some(entry) = arbiter.handlers.get_mut(&id) {
            entry.active = true;
        }
        true
    }

    pub fn deactivate(&self, id: HandlerId) {
        if let Some(entry) = self.inner.borrow_mut().handlers.get_mut(&id) {
            entry.active = false;
        }
    }

    pub fn is_active(&self, id: HandlerId) -> bool {
        self.inner.borrow().handlers.get(&id).is_some_and(|entry| entry.active)
    }

    /// Active handlers working along `axis`
    pub fn active_on(&self, axis: Axis) -> Vec<HandlerId> {
        self.inner
            .borrow()
            .handlers
            .iter()
            .filter(|(_, entry)| entry.active && entry.axis == axis)
            .map(|(id, _)| *id)
            .collect()
    }
}
