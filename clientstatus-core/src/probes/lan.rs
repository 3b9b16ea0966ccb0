//! Wired LAN probe: healthy when any client-facing port has link

use tracing::warn;

use super::ProbeOutcome;
use crate::api::{DeviceApi, EthernetPort};
use crate::profile::DeviceProfile;

/// Port 0 is the WAN port unless the model has no dedicated WAN port
pub fn port_in_scope(port: &EthernetPort, profile: &DeviceProfile) -> bool {
    port.port >= 1 || (port.port == 0 && !profile.has_dedicated_wan_port())
}

pub fn evaluate(ports: &[EthernetPort], profile: &DeviceProfile) -> bool {
    ports
        .iter()
        .any(|port| port_in_scope(port, profile) && port.is_up())
}

pub async fn probe<D: DeviceApi>(device: &D, profile: &DeviceProfile) -> ProbeOutcome {
    match device.ethernet_ports().await {
        Ok(ports) => ProbeOutcome::from_healthy(evaluate(&ports, profile)),
        Err(e) => {
            warn!("Error getting ethernet status: {}", e);
            ProbeOutcome::Unobservable(e.to_string())
        }
    }
}
