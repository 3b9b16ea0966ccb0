//! Wireless probe: healthy when an enabled radio has at least one client

use tracing::warn;

use super::ProbeOutcome;
use crate::api::DeviceApi;

/// The first failed fetch ends the probe for this cycle.
pub async fn probe<D: DeviceApi>(device: &D) -> ProbeOutcome {
    let radios = match device.wifi_radios().await {
        Ok(radios) => radios,
        Err(e) => {
            warn!("Error getting Wi-Fi status: {}", e);
            return ProbeOutcome::Unobservable(e.to_string());
        }
    };

    for radio in radios.iter().filter(|radio| radio.enabled) {
        match device.wifi_clients(&radio.id).await {
            Ok(clients) if !clients.is_empty() => return ProbeOutcome::Healthy,
            Ok(_) => {}
            Err(e) => {
                warn!("Error getting Wi-Fi status: {}", e);
                return ProbeOutcome::Unobservable(e.to_string());
            }
        }
    }

    ProbeOutcome::Unhealthy
}
