use thiserror::Error;

use crate::handler::HandlerFault;

/// Errors returned by event set and channel operations.
///
/// "Nobody is listening" is not an error: raising an unsubscribed channel or
/// removing a handler that was never added succeeds as a no-op.
#[derive(Debug, Error)]
pub enum Error {
    /// The channel is bound to handlers of another payload type.
    ///
    /// A channel takes the payload type of its first handler and keeps it until
    /// its last handler is removed.
    #[error("channel {key} carries `{bound}` payloads, not `{requested}`")]
    PayloadMismatch {
        key: String,
        bound: &'static str,
        requested: &'static str,
    },

    /// A handler failed while the channel was being raised.
    ///
    /// Handlers before `index` ran; handlers after it did not.
    #[error("handler #{index} on channel {key} failed: {source}")]
    HandlerFault {
        key: String,
        index: usize,
        #[source]
        source: HandlerFault,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
