//! Payloads carried by the demo's events.

use std::fmt;

/// Marker payload for the room's "something happened" event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SomeEvent;

/// A mail message notification. Attributes are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMail {
    from: String,
    to: String,
    subject: String,
}

impl NewMail {
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
        }
    }

    #[inline]
    pub fn from(&self) -> &str {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &str {
        &self.to
    }

    #[inline]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for NewMail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.to, self.subject)
    }
}
