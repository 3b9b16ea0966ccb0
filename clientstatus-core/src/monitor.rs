//! Evaluation cycle and poll loop
//!
//! One cycle: sample the four probes, encode the status code, drive the
//! alert from the LAN/WiFi bits, then publish the code if it changed.
//! The loop catches every cycle failure, logs it and waits for the next tick;
//! it is the only retry mechanism.

use std::ops::ControlFlow;

use tracing::{debug, error, info, warn};

use crate::alert::{AlertEdge, AlertMachine, AlertState};
use crate::api::DeviceApi;
use crate::error::{CycleError, DeviceError};
use crate::events::EventSink;
use crate::probes::Readings;
use crate::profile::DeviceProfile;
use crate::publish::{publish_if_changed, PublishOutcome};
use crate::schedule::Ticker;
use crate::status::StatusCode;

/// What a successful cycle observed and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub readings: Readings,
    pub code: StatusCode,
    pub alert: Option<AlertEdge>,
    pub publish: PublishOutcome,
}

/// Counters returned when a ticker stops the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub cycles: u64,
    pub failures: u64,
}

/// Owns the collaborators and the only state kept across cycles
pub struct Monitor<D, E> {
    device: D,
    events: E,
    profile: DeviceProfile,
    alert: AlertMachine,
}

impl<D: DeviceApi, E: EventSink> Monitor<D, E> {
    pub fn new(device: D, events: E, profile: DeviceProfile) -> Self {
        Self {
            device,
            events,
            profile,
            alert: AlertMachine::new(),
        }
    }

    /// Read the model once and classify it against `models_without_wan`
    pub async fn start<S: AsRef<str>>(
        device: D,
        events: E,
        models_without_wan: &[S],
    ) -> Result<Self, DeviceError> {
        let model = device.device_model().await?;
        let profile = DeviceProfile::resolve(model, models_without_wan);
        info!(
            "Monitoring {} (dedicated WAN port: {})",
            profile.model(),
            profile.has_dedicated_wan_port()
        );
        Ok(Self::new(device, events, profile))
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn alert_state(&self) -> AlertState {
        self.alert.state()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Run one full evaluation cycle
    pub async fn run_cycle(&mut self) -> Result<CycleReport, CycleError> {
        let readings = Readings::sample(&self.device, &self.profile).await;
        let bits = readings.bits();
        let code = bits.encode();
        debug!(
            "wan={} ipverify={} lan={} wifi={} -> {}",
            readings.wan, readings.ipverify, readings.lan, readings.wifi, code
        );

        let alert = self.drive_alert(bits.no_clients()).await?;
        let publish = publish_if_changed(&self.device, &code).await?;

        Ok(CycleReport {
            readings,
            code,
            alert,
            publish,
        })
    }

    async fn drive_alert(&mut self, no_clients: bool) -> Result<Option<AlertEdge>, CycleError> {
        let Some(edge) = self.alert.edge(no_clients) else {
            return Ok(None);
        };

        self.events.emit(edge.event_name(), edge.message()).await?;
        self.alert.apply(edge);
        match edge {
            AlertEdge::Raise => warn!("Alert sent: {}", edge.message()),
            AlertEdge::Clear => info!("Alert cleared"),
        }
        Ok(Some(edge))
    }

    /// Poll forever: one cycle, then wait for the ticker.
    ///
    /// Returns only if the ticker breaks, which production tickers never do.
    pub async fn run<T: Ticker>(&mut self, ticker: &mut T) -> LoopStats {
        let mut stats = LoopStats::default();
        loop {
            stats.cycles += 1;
            if let Err(e) = self.run_cycle().await {
                stats.failures += 1;
                error!(kind = e.kind(), "Cycle failed: {}", e);
            }

            if let ControlFlow::Break(()) = ticker.tick().await {
                return stats;
            }
        }
    }
}
