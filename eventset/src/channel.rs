//! A single event with its own handler list.
//!
//! [`Channel`] is the one-event counterpart of [`EventSet`](crate::EventSet): a
//! producer that exposes exactly one event can hold a `Channel` field instead of
//! a keyed table. Subscription and raise semantics are identical.

use std::{
    any::type_name,
    borrow::Cow,
    fmt,
    sync::RwLock,
};

use log::{trace, warn};

use crate::{
    chain::HandlerChain,
    error::{Error, Result},
    handler::Handler,
};

/// One event channel carrying `A` payloads from an `S` sender.
pub struct Channel<S: ?Sized, A> {
    label: Cow<'static, str>,
    chain: RwLock<HandlerChain<S, A>>,
}

impl<S: ?Sized + 'static, A: 'static> Channel<S, A> {
    /// Creates an empty channel labelled with the payload type name.
    pub fn new() -> Self {
        Self::named(type_name::<A>())
    }

    /// Creates an empty channel with a diagnostic label.
    pub fn named(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            chain: RwLock::new(HandlerChain::empty()),
        }
    }

    /// The diagnostic label used in logs and errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Appends `handler` after every handler already subscribed.
    pub fn subscribe(&self, handler: Handler<S, A>) {
        let mut chain = self.chain.write().unwrap();
        *chain = chain.combine(handler);
        trace!("subscribe: {} now has {} handlers", self.label, chain.len());
    }

    /// Removes the first occurrence of `handler`. Returns `false` if it was not
    /// subscribed.
    pub fn unsubscribe(&self, handler: &Handler<S, A>) -> bool {
        let mut chain = self.chain.write().unwrap();
        match chain.remove(handler) {
            Some(remaining) => {
                *chain = remaining;
                trace!("unsubscribe: {} now has {} handlers", self.label, chain.len());
                true
            }
            None => false,
        }
    }

    /// Invokes the subscribed handlers in order and returns how many ran.
    ///
    /// Follows the same snapshot and fault rules as
    /// [`EventSet::raise`](crate::EventSet::raise).
    pub fn raise(&self, sender: &S, payload: &A) -> Result<usize> {
        let snapshot = self.chain.read().unwrap().clone();
        if snapshot.is_empty() {
            trace!("raise: nobody listening on {}", self.label);
            return Ok(0);
        }
        snapshot.invoke(sender, payload).map_err(|fault| {
            warn!("raise: handler #{} on {} failed: {}", fault.index, self.label, fault.source);
            Error::HandlerFault {
                key: self.label.to_string(),
                index: fault.index,
                source: fault.source,
            }
        })
    }

    /// Number of subscribed handlers.
    pub fn handler_count(&self) -> usize {
        self.chain.read().unwrap().len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.chain.read().unwrap().is_empty()
    }
}

impl<S: ?Sized + 'static, A: 'static> Default for Channel<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, A> fmt::Debug for Channel<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
