//! Persistent, ordered handler lists.
//!
//! This module provides [`HandlerChain`], the value stored per channel. A chain is
//! never mutated in place: [`combine()`](HandlerChain::combine) and
//! [`remove()`](HandlerChain::remove) return new chains and leave the receiver
//! untouched.
//!
//! # Snapshots
//!
//! Cloning a chain only bumps a reference count. A raise clones the chain while
//! the table is locked and iterates the clone after the lock is released, so a
//! handler that subscribes or unsubscribes during the raise changes the table's
//! chain, not the one being iterated.
//!
//! # Example
//!
//! ```rust,ignore
//! let first = Handler::new(|_: &(), n: &u32| println!("first {n}"));
//! let second = Handler::new(|_: &(), n: &u32| println!("second {n}"));
//!
//! let chain = HandlerChain::empty().combine(first.clone()).combine(second);
//! assert_eq!(chain.len(), 2);
//!
//! let rest = chain.remove(&first).unwrap();
//! assert_eq!(rest.len(), 1);
//! assert_eq!(chain.len(), 2); // untouched
//! ```

use std::{
    any::{Any, type_name},
    fmt,
    sync::Arc,
};

use crate::handler::{Handler, HandlerFault};

/// An immutable, ordered list of handlers for one channel.
///
/// Order is registration order. The same handler may appear more than once, in
/// which case it is invoked once per occurrence and removed one occurrence at a
/// time.
pub struct HandlerChain<S: ?Sized, A> {
    handlers: Arc<[Handler<S, A>]>,
}

/// A handler failure observed while invoking a chain.
#[derive(Debug)]
pub struct InvokeFault {
    /// Position of the failing handler in the chain.
    pub index: usize,
    /// The error returned by the handler.
    pub source: HandlerFault,
}

impl<S: ?Sized + 'static, A: 'static> HandlerChain<S, A> {
    /// Creates a chain with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: Arc::from(Vec::new()),
        }
    }

    /// Creates a chain holding a single handler.
    pub fn single(handler: Handler<S, A>) -> Self {
        Self {
            handlers: Arc::from(vec![handler]),
        }
    }

    /// Returns a new chain with `handler` appended after every existing handler.
    pub fn combine(&self, handler: Handler<S, A>) -> Self {
        let mut handlers = Vec::with_capacity(self.handlers.len() + 1);
        handlers.extend(self.handlers.iter().cloned());
        handlers.push(handler);
        Self {
            handlers: handlers.into(),
        }
    }

    /// Returns a new chain without the first occurrence of `handler`, or `None`
    /// if the handler is not part of this chain.
    ///
    /// The returned chain may be empty.
    pub fn remove(&self, handler: &Handler<S, A>) -> Option<Self> {
        let index = self.position(handler)?;
        let mut handlers = self.handlers.to_vec();
        handlers.remove(index);
        Some(Self {
            handlers: handlers.into(),
        })
    }

    /// Index of the first occurrence of `handler`.
    pub fn position(&self, handler: &Handler<S, A>) -> Option<usize> {
        self.handlers.iter().position(|h| h.same(handler))
    }

    /// Returns `true` if `handler` is part of this chain.
    #[inline]
    pub fn contains(&self, handler: &Handler<S, A>) -> bool {
        self.position(handler).is_some()
    }

    /// Number of handlers in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if the chain holds no handlers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Handler<S, A>> {
        self.handlers.iter()
    }

    /// Invokes every handler in order and returns how many ran.
    ///
    /// Stops at the first handler that returns an error. Handlers before it keep
    /// their effects; handlers after it are not invoked.
    pub fn invoke(&self, sender: &S, payload: &A) -> Result<usize, InvokeFault> {
        for (index, handler) in self.handlers.iter().enumerate() {
            handler
                .call(sender, payload)
                .map_err(|source| InvokeFault { index, source })?;
        }
        Ok(self.handlers.len())
    }
}

impl<S: ?Sized, A> Clone for HandlerChain<S, A> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<S: ?Sized + 'static, A: 'static> Default for HandlerChain<S, A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: ?Sized, A> fmt::Debug for HandlerChain<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handlers.iter()).finish()
    }
}

/// Type-erased interface for handler chains.
///
/// [`EventSet`](crate::EventSet) stores chains of different payload types in one
/// table as `Arc<dyn ErasedChain<S>>` and downcasts back to the concrete
/// `HandlerChain<S, A>` through [`as_any()`](Self::as_any) when a typed
/// operation needs it.
pub(crate) trait ErasedChain<S: ?Sized>: Send + Sync {
    /// Number of handlers in the chain.
    fn len(&self) -> usize;

    /// Name of the payload type the chain was built for.
    fn payload_type_name(&self) -> &'static str;

    /// Returns a reference to self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<S: ?Sized + 'static, A: 'static> ErasedChain<S> for HandlerChain<S, A> {
    fn len(&self) -> usize {
        HandlerChain::len(self)
    }

    fn payload_type_name(&self) -> &'static str {
        type_name::<A>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn recorder(log: &Log, name: &'static str) -> Handler<(), u32> {
        let log = Arc::clone(log);
        Handler::new(move |_: &(), _: &u32| log.lock().unwrap().push(name))
    }

    // ==================== Composition ====================

    #[test]
    fn empty_chain_has_no_handlers() {
        let chain = HandlerChain::<(), u32>::empty();

        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn combine_appends_in_order() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");

        let chain = HandlerChain::single(a.clone()).combine(b.clone());

        let order: Vec<_> = chain.iter().cloned().collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn combine_leaves_original_untouched() {
        let log = Log::default();
        let original = HandlerChain::single(recorder(&log, "a"));

        let combined = original.combine(recorder(&log, "b"));

        assert_eq!(original.len(), 1);
        assert_eq!(combined.len(), 2);
    }

    // ==================== Removal ====================

    #[test]
    fn remove_drops_first_occurrence_only() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        let chain = HandlerChain::empty()
            .combine(a.clone())
            .combine(b.clone())
            .combine(a.clone());

        let rest = chain.remove(&a).unwrap();

        let order: Vec<_> = rest.iter().cloned().collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn remove_missing_handler_returns_none() {
        let log = Log::default();
        let chain = HandlerChain::single(recorder(&log, "a"));

        assert!(chain.remove(&recorder(&log, "a")).is_none());
    }

    #[test]
    fn remove_last_handler_yields_empty_chain() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let chain = HandlerChain::single(a.clone());

        let rest = chain.remove(&a).unwrap();

        assert!(rest.is_empty());
        assert!(chain.contains(&a));
    }

    // ==================== Invocation ====================

    #[test]
    fn invoke_runs_handlers_in_registration_order() {
        let log = Log::default();
        let chain = HandlerChain::empty()
            .combine(recorder(&log, "first"))
            .combine(recorder(&log, "second"))
            .combine(recorder(&log, "third"));

        let invoked = chain.invoke(&(), &7).unwrap();

        assert_eq!(invoked, 3);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn invoke_stops_at_first_fault() {
        let log = Log::default();
        let failing = Handler::fallible(|_: &(), _: &u32| Err("boom".into()));
        let chain = HandlerChain::empty()
            .combine(recorder(&log, "before"))
            .combine(failing)
            .combine(recorder(&log, "after"));

        let fault = chain.invoke(&(), &1).unwrap_err();

        assert_eq!(fault.index, 1);
        assert_eq!(fault.source.to_string(), "boom");
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn duplicate_handler_runs_once_per_occurrence() {
        let log = Log::default();
        let a = recorder(&log, "a");
        let chain = HandlerChain::single(a.clone()).combine(a);

        chain.invoke(&(), &0).unwrap();

        assert_eq!(log.lock().unwrap().len(), 2);
    }

    // ==================== ErasedChain Trait ====================

    #[test]
    fn erased_chain_reports_len_and_payload_type() {
        let log = Log::default();
        let chain = HandlerChain::single(recorder(&log, "a"));

        let erased: &dyn ErasedChain<()> = &chain;

        assert_eq!(erased.len(), 1);
        assert_eq!(erased.payload_type_name(), "u32");
    }

    #[test]
    fn erased_chain_downcast_checks_payload_type() {
        let log = Log::default();
        let chain = HandlerChain::single(recorder(&log, "a"));
        let erased: &dyn ErasedChain<()> = &chain;

        assert!(erased.as_any().downcast_ref::<HandlerChain<(), u32>>().is_some());
        assert!(erased.as_any().downcast_ref::<HandlerChain<(), i64>>().is_none());
    }
}
