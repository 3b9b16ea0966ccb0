//! WAN uplink probe: healthy when any ethernet WAN device is usable

use tracing::{debug, warn};

use super::ProbeOutcome;
use crate::api::DeviceApi;

/// Whether a WAN summary token means the uplink is usable
pub fn summary_is_up(summary: &str) -> bool {
    summary == "connected" || summary.contains("available") || summary.contains("standby")
}

/// An empty device set is unhealthy on every model, including the ones
/// without a WAN port.
pub async fn probe<D: DeviceApi>(device: &D) -> ProbeOutcome {
    let devices = match device.wan_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            warn!("Error getting WAN devices: {}", e);
            return ProbeOutcome::Unobservable(e.to_string());
        }
    };

    for name in devices.iter().filter(|name| name.contains("ethernet")) {
        match device.wan_summary(name).await {
            Ok(Some(summary)) if summary_is_up(&summary) => {
                debug!("WAN {} is {}", name, summary);
                return ProbeOutcome::Healthy;
            }
            Ok(_) => {}
            Err(e) => debug!("WAN {} summary unreadable, treated as absent: {}", name, e),
        }
    }

    ProbeOutcome::Unhealthy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_summaries() {
        assert!(summary_is_up("connected"));
        assert!(summary_is_up("available"));
        assert!(summary_is_up("standby"));
        assert!(summary_is_up("hot standby"));
        assert!(summary_is_up("available, unplugged"));
    }

    #[test]
    fn unusable_summaries() {
        assert!(!summary_is_up("offline"));
        assert!(!summary_is_up("disconnected"));
        assert!(!summary_is_up("error"));
        assert!(!summary_is_up(""));
    }
}
