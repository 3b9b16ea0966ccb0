//! Outbound event interface used for alert notifications

use crate::error::EventError;

/// Fire-and-forget emitter of named events
///
/// Implementations only need to hand the event to their transport; no
/// acknowledgement from a consumer is expected.
#[allow(async_fn_in_trait)]
pub trait EventSink {
    async fn emit(&self, name: &str, message: &str) -> Result<(), EventError>;
}

