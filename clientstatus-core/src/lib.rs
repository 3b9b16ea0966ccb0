//! Client status core - health evaluation for a network appliance
//!
//! This crate holds everything with real semantics in the agent:
//! - Subsystem probes (WAN, LAN, WiFi, IP-Verify) reducing raw device status to one outcome each
//! - Status encoder producing the 4-digit description code
//! - Edge-triggered "no clients" alert state machine
//! - Change-gated description publishing
//! - Poll loop driven by a substitutable ticker
//!
//! The device API and the event transport are reached only through the
//! [`DeviceApi`] and [`EventSink`] traits.

pub mod alert;
pub mod api;
pub mod error;
pub mod events;
pub mod monitor;
pub mod probes;
pub mod profile;
pub mod publish;
pub mod schedule;
pub mod status;

pub use alert::{AlertEdge, AlertMachine, AlertState};
pub use api::{DeviceApi, EthernetPort, WifiClient, WifiRadio};
pub use error::{CycleError, DeviceError, EventError};
pub use events::EventSink;
pub use monitor::{CycleReport, LoopStats, Monitor};
pub use probes::{ProbeOutcome, Readings};
pub use profile::{DeviceProfile, DEFAULT_MODELS_WITHOUT_WAN};
pub use publish::{publish_if_changed, PublishOutcome};
pub use schedule::{IntervalTicker, Ticker};
pub use status::{HealthBits, StatusCode, StatusCodeError};
