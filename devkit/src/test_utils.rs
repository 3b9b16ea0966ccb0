/*!
Test harness for the monitor

Wires a [`MockDevice`] and [`RecordingEvents`] into a real `Monitor` and
offers assertions on what the appliance and the event bus saw.
*/

use crate::event_stub::RecordingEvents;
use crate::mock_device::MockDevice;
use crate::ticker::CountdownTicker;
use anyhow::Result;
use clientstatus_core::{CycleReport, LoopStats, Monitor, DEFAULT_MODELS_WITHOUT_WAN};
use tracing_subscriber::EnvFilter;

pub struct TestHarness {
    pub device: MockDevice,
    pub events: RecordingEvents,
    pub monitor: Monitor<MockDevice, RecordingEvents>,
}

impl TestHarness {
    /// Start a monitor against `device` with the default WAN-less model list
    pub async fn start(device: MockDevice) -> Result<Self> {
        init_tracing();

        let events = RecordingEvents::new();
        let monitor =
            Monitor::start(device.clone(), events.clone(), DEFAULT_MODELS_WITHOUT_WAN).await?;

        Ok(Self {
            device,
            events,
            monitor,
        })
    }

    pub async fn cycle(&mut self) -> Result<CycleReport> {
        Ok(self.monitor.run_cycle().await?)
    }

    /// Run the poll loop for exactly `cycles` cycles
    pub async fn run_cycles(&mut self, cycles: u64) -> LoopStats {
        let mut ticker = CountdownTicker::cycles(cycles);
        self.monitor.run(&mut ticker).await
    }

    pub fn assert_description(&self, expected: &str) -> Result<()> {
        let actual = self.device.description_value();
        if actual != expected {
            anyhow::bail!("Description mismatch: expected {:?}, got {:?}", expected, actual);
        }
        Ok(())
    }

    pub fn assert_writes(&self, expected: &[&str]) -> Result<()> {
        let writes = self.device.writes();
        if writes != expected {
            anyhow::bail!("Description writes mismatch: expected {:?}, got {:?}", expected, writes);
        }
        Ok(())
    }

    pub fn assert_events(&self, expected: &[&str]) -> Result<()> {
        let names = self.events.names();
        if names != expected {
            anyhow::bail!("Events mismatch: expected {:?}, got {:?}", expected, names);
        }
        Ok(())
    }
}

/// Route tracing output through the test writer; `RUST_LOG` selects levels
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios;

    #[tokio::test]
    async fn test_harness_basic_functionality() {
        let mut harness = TestHarness::start(scenarios::branch_office()).await.unwrap();

        let report = harness.cycle().await.unwrap();
        assert_eq!(report.code, "1110");

        harness.assert_description("1110").unwrap();
        harness.assert_writes(&["1110"]).unwrap();
        harness.assert_events(&[]).unwrap();
        assert!(harness.assert_events(&["clients_connected"]).is_err());
    }
}
