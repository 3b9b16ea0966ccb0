//! MQTT transport for alert events
//!
//! Each named event is published once as JSON on
//! `{topic_prefix}/{event}@v1`. The broker connection is driven by a
//! background task that keeps reconnecting. Emitting only tries to queue
//! the message: a full request queue is reported as an `EventError`
//! instead of waiting for the broker to come back.

use chrono::{DateTime, Utc};
use clientstatus_core::{EventError, EventSink};
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::MqttConfig;

/// Alert event payload (clientstatus/events/<event>@v1)
#[derive(Debug, Serialize)]
pub struct EventMessage<'a> {
    pub event: &'a str,
    pub message: &'a str,
    pub model: &'a str,
    pub timestamp: DateTime<Utc>,
}

pub struct MqttEventSink {
    client: AsyncClient,
    topic_prefix: String,
    model: OnceLock<String>,
}

impl MqttEventSink {
    /// Create the client and start its event loop in the background
    pub fn connect(config: &MqttConfig) -> Self {
        let mut mqtt_options =
            MqttOptions::new(config.client_id(), &config.broker_host, config.broker_port);
        mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        mqtt_options.set_clean_session(true);

        let (client, mut eventloop) = AsyncClient::new(mqtt_options, 10);

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                        info!("Connected to MQTT broker");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT connection error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        });

        Self {
            client,
            topic_prefix: config.topic_prefix.trim_end_matches('/').to_string(),
            model: OnceLock::new(),
        }
    }

    /// Record the device model stamped on every payload. Only the first
    /// call takes effect.
    pub fn set_model(&self, model: &str) {
        let _ = self.model.set(model.to_string());
    }

    pub fn topic(&self, event: &str) -> String {
        format!("{}/{}@v1", self.topic_prefix, event)
    }

    pub fn payload(&self, event: &str, message: &str) -> Result<String, EventError> {
        let body = EventMessage {
            event,
            message,
            model: self.model.get().map(String::as_str).unwrap_or("unknown"),
            timestamp: Utc::now(),
        };
        serde_json::to_string(&body).map_err(|e| EventError::new(event, e))
    }
}

impl EventSink for MqttEventSink {
    async fn emit(&self, name: &str, message: &str) -> Result<(), EventError> {
        let topic = self.topic(name);
        let payload = self.payload(name, message)?;

        self.client
            .try_publish(&topic, QoS::AtLeastOnce, false, payload)
            .map_err(|e| EventError::new(name, e))?;

        debug!("Event {} queued on {}", name, topic);
        Ok(())
    }
}
