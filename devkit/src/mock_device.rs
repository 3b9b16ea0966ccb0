/*!
Mock router for development without an appliance

Holds a scriptable copy of every status tree the probes read, records each
call and each description write, and can fail any call on demand.
*/

use clientstatus_core::{DeviceApi, DeviceError, EthernetPort, WifiClient, WifiRadio};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Device API entry points, for failure injection and call assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    DeviceModel,
    WanDevices,
    WanSummary,
    EthernetPorts,
    WifiRadios,
    WifiClients,
    IpverifyTargets,
    IpverifyPass,
    Description,
    SetDescription,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Value(T),
    Broken,
}

#[derive(Debug, Default)]
struct RouterState {
    model: String,
    wan: Vec<(String, Slot<Option<String>>)>,
    ports: Vec<EthernetPort>,
    radios: Vec<(WifiRadio, Slot<Vec<WifiClient>>)>,
    ipverify: Vec<(String, Slot<bool>)>,
    description: String,
    failing: HashSet<Call>,
    calls: Vec<Call>,
    writes: Vec<String>,
}

/// Shared handle; clones observe and script the same router
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    state: Arc<Mutex<RouterState>>,
}

impl MockDevice {
    pub fn new(model: &str) -> Self {
        let device = Self::default();
        device.state.lock().model = model.to_string();
        device
    }

    pub fn with_wan(self, name: &str, summary: Option<&str>) -> Self {
        self.state
            .lock()
            .wan
            .push((name.to_string(), Slot::Value(summary.map(str::to_string))));
        self
    }

    /// WAN device whose summary read fails
    pub fn with_unreadable_wan(self, name: &str) -> Self {
        self.state.lock().wan.push((name.to_string(), Slot::Broken));
        self
    }

    pub fn with_port(self, port: i64, link: &str) -> Self {
        self.state.lock().ports.push(EthernetPort::new(port, link));
        self
    }

    pub fn with_radio(self, id: &str, enabled: bool, clients: usize) -> Self {
        let clients = (0..clients)
            .map(|n| serde_json::json!({ "mac": format!("00:11:22:33:44:{n:02x}") }))
            .collect();
        self.state
            .lock()
            .radios
            .push((WifiRadio::new(id, enabled), Slot::Value(clients)));
        self
    }

    /// Enabled radio whose client read fails
    pub fn with_unreadable_radio(self, id: &str) -> Self {
        self.state
            .lock()
            .radios
            .push((WifiRadio::new(id, true), Slot::Broken));
        self
    }

    pub fn with_ipverify(self, id: &str, pass: bool) -> Self {
        self.state
            .lock()
            .ipverify
            .push((id.to_string(), Slot::Value(pass)));
        self
    }

    pub fn with_unreadable_ipverify(self, id: &str) -> Self {
        self.state.lock().ipverify.push((id.to_string(), Slot::Broken));
        self
    }

    pub fn with_description(self, description: &str) -> Self {
        self.state.lock().description = description.to_string();
        self
    }

    /// Make every subsequent `call` fail until [`recover`](Self::recover)
    pub fn fail(&self, call: Call) {
        self.state.lock().failing.insert(call);
    }

    pub fn recover(&self, call: Call) {
        self.state.lock().failing.remove(&call);
    }

    pub fn set_ports(&self, ports: &[(i64, &str)]) {
        self.state.lock().ports = ports
            .iter()
            .map(|&(port, link)| EthernetPort::new(port, link))
            .collect();
    }

    pub fn set_radio_clients(&self, id: &str, clients: usize) {
        let mut state = self.state.lock();
        for (radio, slot) in state.radios.iter_mut() {
            if radio.id == id {
                *slot = Slot::Value(vec![serde_json::json!({}); clients]);
            }
        }
    }

    /// Edit the description as another actor would
    pub fn set_description(&self, description: &str) {
        self.state.lock().description = description.to_string();
    }

    pub fn description_value(&self) -> String {
        self.state.lock().description.clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.state.lock().writes.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self, call: Call) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == call).count()
    }

    pub fn clear_log(&self) {
        let mut state = self.state.lock();
        state.calls.clear();
        state.writes.clear();
    }

    fn enter(&self, call: Call, path: &str) -> Result<(), DeviceError> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.failing.contains(&call) {
            return Err(broken(path));
        }
        Ok(())
    }
}

fn broken(path: &str) -> DeviceError {
    DeviceError::transport(
        path,
        std::io::Error::new(std::io::ErrorKind::TimedOut, "mock router timed out"),
    )
}

impl DeviceApi for MockDevice {
    async fn device_model(&self) -> Result<String, DeviceError> {
        self.enter(Call::DeviceModel, "status/product_info/product_name")?;
        Ok(self.state.lock().model.clone())
    }

    async fn wan_devices(&self) -> Result<Vec<String>, DeviceError> {
        self.enter(Call::WanDevices, "status/wan/devices")?;
        Ok(self.state.lock().wan.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn wan_summary(&self, device: &str) -> Result<Option<String>, DeviceError> {
        let path = format!("status/wan/devices/{device}/status/summary");
        self.enter(Call::WanSummary, &path)?;
        let state = self.state.lock();
        match state.wan.iter().find(|(name, _)| name == device) {
            Some((_, Slot::Value(summary))) => Ok(summary.clone()),
            Some((_, Slot::Broken)) => Err(broken(&path)),
            None => Ok(None),
        }
    }

    async fn ethernet_ports(&self) -> Result<Vec<EthernetPort>, DeviceError> {
        self.enter(Call::EthernetPorts, "status/ethernet")?;
        Ok(self.state.lock().ports.clone())
    }

    async fn wifi_radios(&self) -> Result<Vec<WifiRadio>, DeviceError> {
        self.enter(Call::WifiRadios, "status/wlan/radio")?;
        Ok(self.state.lock().radios.iter().map(|(radio, _)| radio.clone()).collect())
    }

    async fn wifi_clients(&self, radio: &str) -> Result<Vec<WifiClient>, DeviceError> {
        let path = format!("status/wlan/clients?radio={radio}");
        self.enter(Call::WifiClients, &path)?;
        let state = self.state.lock();
        match state.radios.iter().find(|(r, _)| r.id == radio) {
            Some((_, Slot::Value(clients))) => Ok(clients.clone()),
            Some((_, Slot::Broken)) => Err(broken(&path)),
            None => Ok(Vec::new()),
        }
    }

    async fn ipverify_targets(&self) -> Result<Vec<String>, DeviceError> {
        self.enter(Call::IpverifyTargets, "status/ipverify")?;
        Ok(self.state.lock().ipverify.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn ipverify_pass(&self, target: &str) -> Result<bool, DeviceError> {
        let path = format!("status/ipverify/{target}/pass");
        self.enter(Call::IpverifyPass, &path)?;
        let state = self.state.lock();
        match state.ipverify.iter().find(|(id, _)| id == target) {
            Some((_, Slot::Value(pass))) => Ok(*pass),
            Some((_, Slot::Broken)) => Err(broken(&path)),
            None => Ok(false),
        }
    }

    async fn description(&self) -> Result<String, DeviceError> {
        self.enter(Call::Description, "config/system/desc")?;
        Ok(self.state.lock().description.clone())
    }

    async fn set_description(&self, value: &str) -> Result<(), DeviceError> {
        self.enter(Call::SetDescription, "config/system/desc")?;
        let mut state = self.state.lock();
        state.description = value.to_string();
        state.writes.push(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_and_writes() {
        let device = MockDevice::new("E300").with_description("old");

        assert_eq!(device.description().await.unwrap(), "old");
        DeviceApi::set_description(&device, "1010").await.unwrap();

        assert_eq!(device.writes(), vec!["1010"]);
        assert_eq!(device.description_value(), "1010");
        assert_eq!(device.calls(), vec![Call::Description, Call::SetDescription]);
    }

    #[tokio::test]
    async fn test_failure_injection_and_recovery() {
        let device = MockDevice::new("E300").with_port(1, "up");

        device.fail(Call::EthernetPorts);
        assert!(device.ethernet_ports().await.is_err());

        device.recover(Call::EthernetPorts);
        assert_eq!(device.ethernet_ports().await.unwrap().len(), 1);
        assert_eq!(device.call_count(Call::EthernetPorts), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let device = MockDevice::new("E300").with_radio("0", true, 0);
        let handle = device.clone();

        handle.set_radio_clients("0", 2);
        assert_eq!(device.wifi_clients("0").await.unwrap().len(), 2);
        assert!(device.wifi_clients("missing").await.unwrap().is_empty());
    }
}
