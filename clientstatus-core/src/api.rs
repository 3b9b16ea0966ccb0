//! Device API consumed by the probes and the change gate
//!
//! Every read maps "not present on this appliance" to an empty collection or
//! `None`; only transport or payload problems surface as [`DeviceError`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DeviceError;

/// One wired port as reported by the appliance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthernetPort {
    pub port: i64,
    pub link: String,
}

impl EthernetPort {
    pub fn new(port: i64, link: impl Into<String>) -> Self {
        Self {
            port,
            link: link.into(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.link == "up"
    }
}

/// One wireless radio; only enabled radios are asked for clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiRadio {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
}

impl WifiRadio {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled,
        }
    }
}

/// Associated wireless client; its content is never inspected
pub type WifiClient = serde_json::Value;

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Narrow read/write view of the appliance
#[allow(async_fn_in_trait)]
pub trait DeviceApi {
    /// Hardware SKU / product name
    async fn device_model(&self) -> Result<String, DeviceError>;

    /// Names of the configured WAN devices
    async fn wan_devices(&self) -> Result<Vec<String>, DeviceError>;

    /// Summary token of one WAN device (`connected`, `available`, `standby`, ...)
    async fn wan_summary(&self, device: &str) -> Result<Option<String>, DeviceError>;

    async fn ethernet_ports(&self) -> Result<Vec<EthernetPort>, DeviceError>;

    async fn wifi_radios(&self) -> Result<Vec<WifiRadio>, DeviceError>;

    async fn wifi_clients(&self, radio: &str) -> Result<Vec<WifiClient>, DeviceError>;

    /// Ids of the configured IP-Verify tests
    async fn ipverify_targets(&self) -> Result<Vec<String>, DeviceError>;

    async fn ipverify_pass(&self, target: &str) -> Result<bool, DeviceError>;

    /// Current system description field
    async fn description(&self) -> Result<String, DeviceError>;

    async fn set_description(&self, value: &str) -> Result<(), DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_id_accepts_numbers_and_strings() {
        let radios: Vec<WifiRadio> =
            serde_json::from_str(r#"[{"id": 0, "enabled": true}, {"id": "5g", "enabled": false}]"#)
                .unwrap();
        assert_eq!(radios[0], WifiRadio::new("0", true));
        assert_eq!(radios[1], WifiRadio::new("5g", false));
    }

    #[test]
    fn radio_without_enabled_flag_is_disabled() {
        let radio: WifiRadio = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(!radio.enabled);
    }

    #[test]
    fn only_literal_up_counts_as_link() {
        assert!(EthernetPort::new(1, "up").is_up());
        assert!(!EthernetPort::new(1, "down").is_up());
        assert!(!EthernetPort::new(1, "UP").is_up());
    }
}
