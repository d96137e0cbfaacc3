//! Identity-comparable event handlers.

use std::{fmt, sync::Arc};

/// The error a fallible handler reports back to the raiser.
pub type HandlerFault = Box<dyn std::error::Error + Send + Sync>;

/// A callable subscribed to a channel, receiving `(sender, payload)`.
///
/// Handlers compare by identity. A clone is the same handler and can be used to
/// unsubscribe the original; two handlers built from identical closures are
/// still different handlers. Keep a clone of whatever you subscribe if you
/// intend to remove it later.
///
/// ```rust,ignore
/// let handler = Handler::new(|_: &MailRoom, mail: &NewMail| log::info!("{}", mail.subject()));
/// room.subscribe_mail_events(handler.clone())?;
/// room.unsubscribe_mail_events(&handler);
/// ```
pub struct Handler<S: ?Sized, A> {
    func: Arc<dyn Fn(&S, &A) -> Result<(), HandlerFault> + Send + Sync>,
}

impl<S: ?Sized + 'static, A: 'static> Handler<S, A> {
    /// Wraps an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S, &A) + Send + Sync + 'static,
    {
        Self::fallible(move |sender: &S, payload: &A| {
            f(sender, payload);
            Ok(())
        })
    }

    /// Wraps a closure that may fail. A failure stops the raise that invoked it.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&S, &A) -> Result<(), HandlerFault> + Send + Sync + 'static,
    {
        Self { func: Arc::new(f) }
    }

    /// Invokes the handler.
    #[inline]
    pub fn call(&self, sender: &S, payload: &A) -> Result<(), HandlerFault> {
        (self.func)(sender, payload)
    }

    /// Returns `true` if both values refer to the same subscribed callable.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<S: ?Sized, A> Clone for Handler<S, A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

impl<S: ?Sized, A> PartialEq for Handler<S, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<S: ?Sized, A> Eq for Handler<S, A> {}

impl<S: ?Sized, A> fmt::Debug for Handler<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.func) as *const ())
    }
}
