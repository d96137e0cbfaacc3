//! In-process publish/subscribe built around a keyed multicast table.
//!
//! - [`EventKey`]: identity-only token naming a channel
//! - [`Handler`]: identity-comparable callable receiving `(sender, payload)`
//! - [`HandlerChain`]: immutable, ordered handler list for one channel
//! - [`EventSet`]: thread-safe table from key to chain with add, remove and raise
//! - [`Channel`]: a single event with its own chain
//! - [`EventSource`]: the pattern of a producer exposing many events through one set

pub mod chain;
pub mod channel;
pub mod error;
pub mod handler;
pub mod key;
pub mod set;
pub mod source;

pub use chain::HandlerChain;
pub use channel::Channel;
pub use error::{Error, Result};
pub use handler::{Handler, HandlerFault};
pub use key::EventKey;
pub use set::EventSet;
pub use source::EventSource;
