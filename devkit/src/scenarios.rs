/*!
Canned router states

Each builder returns a fresh [`MockDevice`] describing a typical site, so
tests start from a realistic appliance and tweak only what they need.
*/

use crate::mock_device::MockDevice;

/// Model with a dedicated WAN port, uplink connected, one wired client,
/// WiFi up but empty, two passing IP-Verify tests. Expected code `1110`.
pub fn branch_office() -> MockDevice {
    MockDevice::new("E300-C18B")
        .with_wan("ethernet-wan", Some("connected"))
        .with_wan("mdm-4a2b", Some("available"))
        .with_port(0, "down")
        .with_port(1, "up")
        .with_radio("0", true, 0)
        .with_ipverify("gateway", true)
        .with_ipverify("dns", true)
}

/// WAN-less model with a client on port 0 and nothing else configured.
/// Expected code `0010`.
pub fn wanless_kiosk() -> MockDevice {
    MockDevice::new("IBR200-10M").with_port(0, "up")
}

/// Every status tree empty. Expected code `0000` and a raised alert.
pub fn dark_site() -> MockDevice {
    MockDevice::new("E300-C18B")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientstatus_core::DeviceApi;

    #[tokio::test]
    async fn test_scenarios_start_with_blank_description() {
        for device in [branch_office(), wanless_kiosk(), dark_site()] {
            assert_eq!(device.description().await.unwrap(), "");
            assert!(device.writes().is_empty());
        }
    }
}
