//! Change-gated description publishing

use tracing::{debug, info};

use crate::api::DeviceApi;
use crate::error::DeviceError;
use crate::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Unchanged,
    Written { previous: String },
}

impl PublishOutcome {
    pub fn was_written(&self) -> bool {
        matches!(self, PublishOutcome::Written { .. })
    }
}

/// Write `code` to the description only if it differs from what the
/// device currently stores. The stored value is read on every call since
/// anything else may have edited it.
pub async fn publish_if_changed<D: DeviceApi>(
    device: &D,
    code: &StatusCode,
) -> Result<PublishOutcome, DeviceError> {
    let current = device.description().await?;
    if current == code.as_str() {
        debug!("Description already {}", code);
        return Ok(PublishOutcome::Unchanged);
    }

    device.set_description(code.as_str()).await?;
    info!("Description updated: {:?} -> {}", current, code);
    Ok(PublishOutcome::Written { previous: current })
}
