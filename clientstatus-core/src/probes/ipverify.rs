//! Reachability probe over the appliance's IP-Verify tests
//!
//! No configured test reads as unhealthy, so "not set up" is never mistaken
//! for "set up and passing".

use tracing::{debug, warn};

use super::ProbeOutcome;
use crate::api::DeviceApi;

pub async fn probe<D: DeviceApi>(device: &D) -> ProbeOutcome {
    let targets = match device.ipverify_targets().await {
        Ok(targets) => targets,
        Err(e) => {
            warn!("Error getting IP Verify status: {}", e);
            return ProbeOutcome::Unobservable(e.to_string());
        }
    };

    if targets.is_empty() {
        debug!("No IP Verify tests configured");
        return ProbeOutcome::Unhealthy;
    }

    for target in &targets {
        match device.ipverify_pass(target).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("IP Verify {} failing", target);
                return ProbeOutcome::Unhealthy;
            }
            Err(e) => {
                warn!("Error getting IP Verify status: {}", e);
                return ProbeOutcome::Unobservable(e.to_string());
            }
        }
    }

    ProbeOutcome::Healthy
}
