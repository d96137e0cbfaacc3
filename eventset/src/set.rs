//! Keyed multicast dispatcher shared by every event a producer exposes.
//!
//! This module provides [`EventSet`], a thread-safe table from channel key to
//! [`HandlerChain`]. A producer that exposes many events owns one set and one
//! key per event instead of one lock and one list per event.
//!
//! # Overview
//!
//! - **Add**: appends a handler to the key's chain, creating the channel on first use
//! - **Remove**: drops the first identical handler; the last removal deletes the channel
//! - **Raise**: snapshots the chain, releases the table, then invokes handlers in order
//!
//! # Type Erasure
//!
//! Internally, chains are stored as `Arc<dyn ErasedChain<S>>` so that channels
//! with different payload types can share one table. Typed operations downcast
//! back to `HandlerChain<S, A>`; a key can only carry one payload type at a time.
//!
//! # Locking
//!
//! The table is a `DashMap`. Add and Remove hold the key's map entry for their
//! whole read-modify-write, so concurrent updates to one key never lose each
//! other. Raise only holds the entry long enough to clone the chain's `Arc`;
//! handlers always run with no lock held, which lets them add, remove or raise
//! on the same set.
//!
//! # Example
//!
//! ```rust,ignore
//! use eventset::{EventKey, EventSet, Handler};
//!
//! let set = EventSet::<()>::new();
//! let key = EventKey::named("greeting");
//! let hello = Handler::new(|_: &(), name: &String| println!("hello {name}"));
//!
//! set.add(&key, hello.clone())?;
//! assert_eq!(set.raise(&key, &(), &"world".to_string())?, 1);
//!
//! set.remove(&key, &hello);
//! assert_eq!(set.raise(&key, &(), &"nobody".to_string())?, 0);
//! ```

use std::{any::type_name, fmt, hash::Hash, sync::Arc};

use dashmap::DashMap;
use log::{debug, trace, warn};

use crate::{
    EventKey,
    chain::{ErasedChain, HandlerChain},
    error::{Error, Result},
    handler::Handler,
};

/// A thread-safe table of handler chains, one per channel key.
///
/// `S` is the sender type handed to every handler (usually the producer that
/// owns the set). `K` is the channel key type; it defaults to the identity-only
/// [`EventKey`], but any `Eq + Hash + Clone` type works.
///
/// # Invariant
///
/// A key present in the table always maps to a non-empty chain. Removing the
/// last handler of a channel deletes the key, so raising an unused channel is a
/// plain lookup miss.
///
/// # Handler Faults
///
/// Handlers run in registration order. The first handler to return an error
/// stops the raise: earlier handlers keep their effects, later handlers are not
/// invoked, and the fault is returned as [`Error::HandlerFault`]. Nothing is
/// unsubscribed; the next raise invokes the full chain again. A panicking
/// handler unwinds through [`raise()`](Self::raise) the same way and leaves the
/// set usable.
pub struct EventSet<S: ?Sized, K = EventKey> {
    /// Type-erased chains keyed by channel.
    chains: DashMap<K, Arc<dyn ErasedChain<S>>>,
}

impl<S: ?Sized + 'static> EventSet<S> {
    /// Creates an empty event set keyed by [`EventKey`].
    pub fn new() -> Self {
        Self {
            chains: DashMap::new(),
        }
    }

    /// Creates an empty event set with room for `capacity` channels before the
    /// table has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chains: DashMap::with_capacity(capacity),
        }
    }
}

impl<S, K> EventSet<S, K>
where
    S: ?Sized + 'static,
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Subscribes `handler` to the channel named by `key`.
    ///
    /// The handler runs after every handler already on the channel. If the
    /// channel had no handlers, it is created and bound to payload type `A`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadMismatch`] if the channel is bound to another
    /// payload type. The table is left unchanged.
    pub fn add<A: 'static>(&self, key: &K, handler: Handler<S, A>) -> Result<()> {
        match self.chains.entry(key.clone()) {
            dashmap::Entry::Occupied(mut occupied) => {
                let combined = downcast::<S, A, K>(key, &**occupied.get())?.combine(handler);
                trace!("add: {key:?} now has {} handlers", combined.len());
                occupied.insert(erase(combined));
            }
            dashmap::Entry::Vacant(vacant) => {
                debug!("add: opened {key:?} for `{}`", type_name::<A>());
                vacant.insert(erase(HandlerChain::single(handler)));
            }
        }
        Ok(())
    }

    /// Unsubscribes the first occurrence of `handler` from the channel.
    ///
    /// Returns `true` if a handler was removed. Removing a handler that is not
    /// subscribed (including one of another payload type) is a no-op that
    /// returns `false`. Removing the last handler deletes the channel.
    pub fn remove<A: 'static>(&self, key: &K, handler: &Handler<S, A>) -> bool {
        let dashmap::Entry::Occupied(mut occupied) = self.chains.entry(key.clone()) else {
            trace!("remove: {key:?} has no handlers");
            return false;
        };
        let Some(chain) = occupied
            .get()
            .as_any()
            .downcast_ref::<HandlerChain<S, A>>()
        else {
            trace!("remove: {key:?} does not carry `{}`", type_name::<A>());
            return false;
        };
        let Some(remaining) = chain.remove(handler) else {
            trace!("remove: handler not subscribed to {key:?}");
            return false;
        };

        if remaining.is_empty() {
            occupied.remove();
            debug!("remove: closed {key:?}");
        } else {
            trace!("remove: {key:?} now has {} handlers", remaining.len());
            occupied.insert(erase(remaining));
        }
        true
    }

    /// Invokes every handler subscribed to the channel, in registration order,
    /// with `sender` and `payload`. Returns the number of handlers invoked.
    ///
    /// Raising a channel with no handlers invokes nothing and returns `Ok(0)`.
    ///
    /// The chain is snapshotted before any handler runs. Handlers may add, remove
    /// or raise on this set; such changes only affect later raises.
    ///
    /// # Errors
    ///
    /// - [`Error::PayloadMismatch`] if the channel is bound to another payload type.
    /// - [`Error::HandlerFault`] if a handler fails; see the type-level docs for
    ///   what has and has not run at that point.
    pub fn raise<A: 'static>(&self, key: &K, sender: &S, payload: &A) -> Result<usize> {
        let snapshot = match self.chains.get(key) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                trace!("raise: nobody listening on {key:?}");
                return Ok(0);
            }
        };

        let chain = downcast::<S, A, K>(key, &*snapshot)?;
        trace!("raise: {key:?} to {} handlers", chain.len());
        chain.invoke(sender, payload).map_err(|fault| {
            warn!("raise: handler #{} on {key:?} failed: {}", fault.index, fault.source);
            Error::HandlerFault {
                key: format!("{key:?}"),
                index: fault.index,
                source: fault.source,
            }
        })
    }

    /// Unsubscribes every handler from the channel and returns how many there were.
    pub fn clear(&self, key: &K) -> usize {
        match self.chains.remove(key) {
            Some((_, chain)) => {
                debug!("clear: closed {key:?} with {} handlers", chain.len());
                chain.len()
            }
            None => 0,
        }
    }

    /// Number of handlers currently subscribed to the channel.
    pub fn handler_count(&self, key: &K) -> usize {
        self.chains.get(key).map_or(0, |chain| chain.len())
    }

    /// Returns `true` if the channel has at least one handler.
    #[inline]
    pub fn is_subscribed(&self, key: &K) -> bool {
        self.chains.contains_key(key)
    }

    /// Number of channels with at least one handler.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.chains.len()
    }

    /// Returns `true` if no channel has any handler.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl<S: ?Sized, K: Eq + Hash> Default for EventSet<S, K> {
    fn default() -> Self {
        Self {
            chains: DashMap::new(),
        }
    }
}

impl<S: ?Sized, K: Eq + Hash> fmt::Debug for EventSet<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSet")
            .field("channels", &self.chains.len())
            .finish()
    }
}

fn erase<S: ?Sized + 'static, A: 'static>(chain: HandlerChain<S, A>) -> Arc<dyn ErasedChain<S>> {
    Arc::new(chain)
}

fn downcast<'a, S, A, K>(key: &K, chain: &'a dyn ErasedChain<S>) -> Result<&'a HandlerChain<S, A>>
where
    S: ?Sized + 'static,
    A: 'static,
    K: fmt::Debug,
{
    chain
        .as_any()
        .downcast_ref::<HandlerChain<S, A>>()
        .ok_or_else(|| Error::PayloadMismatch {
            key: format!("{key:?}"),
            bound: chain.payload_type_name(),
            requested: type_name::<A>(),
        })
}
