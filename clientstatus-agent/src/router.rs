//! Router REST API client
//!
//! Reads status trees and writes the description through the appliance's
//! local API:
//! - `GET  {base}/api/{path}` answering `{"success": bool, "data": ...}`
//! - `PUT  {base}/api/{path}` with form field `data` holding a JSON value
//!
//! Every request is bounded by the configured timeout.

use clientstatus_core::{DeviceApi, DeviceError, EthernetPort, WifiClient, WifiRadio};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::RouterConfig;

pub const PRODUCT_NAME_PATH: &str = "status/product_info/product_name";
pub const WAN_DEVICES_PATH: &str = "status/wan/devices";
pub const ETHERNET_STATUS_PATH: &str = "status/ethernet";
pub const WIFI_RADIO_STATUS_PATH: &str = "status/wlan/radio";
pub const WIFI_CLIENTS_STATUS_PATH: &str = "status/wlan/clients";
pub const IPVERIFY_STATUS_PATH: &str = "status/ipverify";
pub const SYSTEM_DESC_PATH: &str = "config/system/desc";

/// Response envelope of the router API
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone)]
pub struct RouterClient {
    http: Client,
    base_url: String,
    username: String,
    password: Option<String>,
}

impl RouterClient {
    pub fn new(config: &RouterConfig) -> Result<Self, DeviceError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DeviceError::transport(&config.base_url, e))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch `path`; `null` data reads as `None`
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, DeviceError> {
        debug!("GET {}", path);
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(&self.username, self.password.as_ref())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DeviceError::transport(path, e))?;

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| DeviceError::transport(path, e))?;
        let data = unwrap_envelope(path, envelope)?;
        if data.is_null() {
            return Ok(None);
        }

        serde_json::from_value(data)
            .map(Some)
            .map_err(|source| DeviceError::Decode {
                path: path.to_string(),
                source,
            })
    }

    async fn put(&self, path: &str, value: &Value) -> Result<(), DeviceError> {
        debug!("PUT {} = {}", path, value);
        let response = self
            .http
            .put(self.url(path))
            .basic_auth(&self.username, self.password.as_ref())
            .form(&[("data", value.to_string())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DeviceError::transport(path, e))?;

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| DeviceError::transport(path, e))?;
        unwrap_envelope(path, envelope).map(|_| ())
    }

    /// Keys of an object-valued status tree
    async fn keys(&self, path: &str) -> Result<Vec<String>, DeviceError> {
        let tree: Option<Map<String, Value>> = self.get(path).await?;
        Ok(tree.map(|map| map.keys().cloned().collect()).unwrap_or_default())
    }
}

fn unwrap_envelope(path: &str, envelope: Envelope) -> Result<Value, DeviceError> {
    if envelope.success {
        return Ok(envelope.data);
    }

    let reason = match envelope.data {
        Value::String(reason) => reason,
        Value::Null => "unspecified".to_string(),
        other => other.to_string(),
    };
    Err(DeviceError::Rejected {
        path: path.to_string(),
        reason,
    })
}

impl DeviceApi for RouterClient {
    async fn device_model(&self) -> Result<String, DeviceError> {
        self.get(PRODUCT_NAME_PATH)
            .await?
            .ok_or_else(|| DeviceError::Missing(PRODUCT_NAME_PATH.to_string()))
    }

    async fn wan_devices(&self) -> Result<Vec<String>, DeviceError> {
        self.keys(WAN_DEVICES_PATH).await
    }

    async fn wan_summary(&self, device: &str) -> Result<Option<String>, DeviceError> {
        self.get(&format!("{WAN_DEVICES_PATH}/{device}/status/summary")).await
    }

    async fn ethernet_ports(&self) -> Result<Vec<EthernetPort>, DeviceError> {
        Ok(self.get(ETHERNET_STATUS_PATH).await?.unwrap_or_default())
    }

    async fn wifi_radios(&self) -> Result<Vec<WifiRadio>, DeviceError> {
        Ok(self.get(WIFI_RADIO_STATUS_PATH).await?.unwrap_or_default())
    }

    async fn wifi_clients(&self, radio: &str) -> Result<Vec<WifiClient>, DeviceError> {
        Ok(self
            .get(&format!("{WIFI_CLIENTS_STATUS_PATH}?radio={radio}"))
            .await?
            .unwrap_or_default())
    }

    async fn ipverify_targets(&self) -> Result<Vec<String>, DeviceError> {
        self.keys(IPVERIFY_STATUS_PATH).await
    }

    async fn ipverify_pass(&self, target: &str) -> Result<bool, DeviceError> {
        Ok(self
            .get(&format!("{IPVERIFY_STATUS_PATH}/{target}/pass"))
            .await?
            .unwrap_or(false))
    }

    async fn description(&self) -> Result<String, DeviceError> {
        Ok(self.get(SYSTEM_DESC_PATH).await?.unwrap_or_default())
    }

    async fn set_description(&self, value: &str) -> Result<(), DeviceError> {
        self.put(SYSTEM_DESC_PATH, &Value::String(value.to_string())).await
    }
}
