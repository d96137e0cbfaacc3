//! Identity-only tokens that name event channels.
//!
//! An [`EventKey`] carries no payload. Two keys are equal only when one is a
//! clone of the other; minting a second key with the same label produces a
//! different channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::LazyLock;
//! use eventset::EventKey;
//!
//! static NEW_MAIL: LazyLock<EventKey> = LazyLock::new(|| EventKey::named("new_mail"));
//!
//! let other = EventKey::named("new_mail");
//! assert_ne!(*NEW_MAIL, other);
//! assert_eq!(*NEW_MAIL, NEW_MAIL.clone());
//! ```

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// An opaque token naming one event channel.
///
/// Equality and hashing use the address of the shared allocation, so a key is
/// cheap to clone and safe to use as a map key from any thread. The optional
/// label only shows up in `Debug`/`Display` output and log lines.
#[derive(Clone)]
pub struct EventKey {
    inner: Arc<KeyInner>,
}

struct KeyInner {
    label: Option<Cow<'static, str>>,
}

impl EventKey {
    /// Mints a fresh, anonymous key.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(KeyInner { label: None }),
        }
    }

    /// Mints a fresh key with a diagnostic label.
    ///
    /// The label does not participate in equality.
    pub fn named(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: Arc::new(KeyInner {
                label: Some(label.into()),
            }),
        }
    }

    /// The diagnostic label, if one was given.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    #[inline]
    fn addr(&self) -> *const KeyInner {
        Arc::as_ptr(&self.inner)
    }
}

impl Default for EventKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for EventKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for EventKey {}

impl Hash for EventKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.addr(), state);
    }
}

impl fmt::Debug for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EventKey({}@{:p})",
            self.label().unwrap_or("anonymous"),
            self.addr()
        )
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "key@{:p}", self.addr()),
        }
    }
}
