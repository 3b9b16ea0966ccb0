//! Client Status Agent - appliance-side health publisher
//!
//! Wires the evaluation core to real collaborators:
//! - Configuration file + environment overrides
//! - Router REST API client (device reads and description writes)
//! - MQTT event sink for alert notifications

pub mod config;
pub mod mqtt;
pub mod router;

pub use config::AgentConfig;
pub use mqtt::MqttEventSink;
pub use router::RouterClient;
