//! Subsystem probes
//!
//! Each probe reads one subsystem through the [`DeviceApi`] and reduces it to a
//! [`ProbeOutcome`]. Read failures are absorbed here: they never leave a probe,
//! so one unreliable subsystem cannot hide the health of the others.

pub mod ipverify;
pub mod lan;
pub mod wan;
pub mod wifi;

use std::fmt;

use crate::api::DeviceApi;
use crate::profile::DeviceProfile;
use crate::status::HealthBits;

/// Result of one probe for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    /// Observed and found down
    Unhealthy,
    /// Could not be observed; counts as down for this cycle only
    Unobservable(String),
}

impl ProbeOutcome {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy {
            ProbeOutcome::Healthy
        } else {
            ProbeOutcome::Unhealthy
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }

    pub fn is_unobservable(&self) -> bool {
        matches!(self, ProbeOutcome::Unobservable(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Healthy => f.write_str("healthy"),
            ProbeOutcome::Unhealthy => f.write_str("unhealthy"),
            ProbeOutcome::Unobservable(reason) => write!(f, "unobservable ({reason})"),
        }
    }
}

/// Outcomes of all four probes, sampled fresh every cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings {
    pub wan: ProbeOutcome,
    pub ipverify: ProbeOutcome,
    pub lan: ProbeOutcome,
    pub wifi: ProbeOutcome,
}

impl Readings {
    /// Run every probe in sequence against the device
    pub async fn sample<D: DeviceApi>(device: &D, profile: &DeviceProfile) -> Self {
        let wan = wan::probe(device).await;
        let lan = lan::probe(device, profile).await;
        let wifi = wifi::probe(device).await;
        let ipverify = ipverify::probe(device).await;

        Readings {
            wan,
            ipverify,
            lan,
            wifi,
        }
    }

    pub fn bits(&self) -> HealthBits {
        HealthBits {
            wan: self.wan.is_healthy(),
            ipverify: self.ipverify.is_healthy(),
            lan: self.lan.is_healthy(),
            wifi: self.wifi.is_healthy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unobservable_reads_as_down() {
        let readings = Readings {
            wan: ProbeOutcome::Healthy,
            ipverify: ProbeOutcome::Unobservable("timeout".into()),
            lan: ProbeOutcome::Unhealthy,
            wifi: ProbeOutcome::Healthy,
        };
        assert_eq!(readings.bits().encode(), "1001");
        assert!(readings.ipverify.is_unobservable());
        assert!(!readings.lan.is_unobservable());
    }

    #[test]
    fn outcome_display_carries_reason() {
        let outcome = ProbeOutcome::Unobservable("status/wlan/radio: timed out".into());
        assert_eq!(outcome.to_string(), "unobservable (status/wlan/radio: timed out)");
        assert_eq!(ProbeOutcome::from_healthy(true).to_string(), "healthy");
    }
}
