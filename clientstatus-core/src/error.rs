//! Error types shared by the probes, the change gate and the poll loop

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reading from or writing to the device API
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("transport failure on {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("device rejected {path}: {reason}")]
    Rejected { path: String, reason: String },

    #[error("unexpected payload at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no value at {0}")]
    Missing(String),
}

impl DeviceError {
    pub fn transport<E>(path: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        DeviceError::Transport {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failure handing a named event to the event transport
#[derive(Debug, Error)]
#[error("failed to emit {event}: {message}")]
pub struct EventError {
    pub event: String,
    pub message: String,
}

impl EventError {
    pub fn new(event: impl Into<String>, message: impl ToString) -> Self {
        Self {
            event: event.into(),
            message: message.to_string(),
        }
    }
}

/// Anything that abandons an evaluation cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Event(#[from] EventError),
}

impl CycleError {
    /// Short error class used in loop diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Device(DeviceError::Transport { .. }) => "DeviceTransport",
            CycleError::Device(DeviceError::Rejected { .. }) => "DeviceRejected",
            CycleError::Device(DeviceError::Decode { .. }) => "DeviceDecode",
            CycleError::Device(DeviceError::Missing(_)) => "DeviceMissing",
            CycleError::Event(_) => "EventEmit",
        }
    }
}
