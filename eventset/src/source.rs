//! Producers that expose many events through one [`EventSet`].
//!
//! A producer owns a single `EventSet<Self>` and one `static` [`EventKey`] per
//! event it exposes. Its subscribe/unsubscribe methods forward to
//! [`EventSet::add`] / [`EventSet::remove`] with the event's key, and firing an
//! event goes through [`EventSource::on_event`], which raises with the producer
//! itself as sender.
//!
//! ```rust,ignore
//! static TICK: LazyLock<EventKey> = LazyLock::new(|| EventKey::named("tick"));
//!
//! struct Clock {
//!     events: EventSet<Clock>,
//! }
//!
//! impl EventSource for Clock {
//!     fn event_set(&self) -> &EventSet<Self> {
//!         &self.events
//!     }
//! }
//!
//! impl Clock {
//!     pub fn subscribe_tick(&self, handler: Handler<Clock, u64>) -> eventset::Result<()> {
//!         self.events.add(&TICK, handler)
//!     }
//!
//!     pub fn tick(&self, n: u64) -> eventset::Result<usize> {
//!         self.on_event(&TICK, &n)
//!     }
//! }
//! ```

use crate::{EventKey, EventSet, error::Result};

/// A type that publishes its events through an owned [`EventSet`].
pub trait EventSource: Sized + 'static {
    /// The set holding every channel this source exposes.
    fn event_set(&self) -> &EventSet<Self>;

    /// Raises `key` with `self` as sender.
    ///
    /// Override to intercept every event the source fires.
    fn on_event<A: 'static>(&self, key: &EventKey, payload: &A) -> Result<usize> {
        self.event_set().raise(key, self, payload)
    }
}
