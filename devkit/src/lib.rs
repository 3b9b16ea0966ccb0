/*!
# Client Status DevKit - Stubs and utilities for testing the agent

In-memory collaborators so the monitor can be exercised without an appliance:
- Scriptable router stub implementing `DeviceApi`
- Recording event sink implementing `EventSink`
- Tickers that stop after a fixed number of cycles
- Canned router scenarios and a test harness with assertions
*/

pub mod event_stub;
pub mod mock_device;
pub mod scenarios;
pub mod test_utils;
pub mod ticker;

pub use event_stub::{RecordedEvent, RecordingEvents};
pub use mock_device::{Call, MockDevice};
pub use test_utils::TestHarness;
pub use ticker::CountdownTicker;
