//! Client Status Agent - publishes appliance health as a 4-digit description
//!
//! Every poll interval the agent:
//! - Samples WAN, IP-Verify, LAN and WiFi health from the router API
//! - Raises / clears the "no clients connected" alert on edges
//! - Writes the status code to the system description when it changed

use anyhow::{Context, Result};
use clientstatus_agent::{AgentConfig, MqttEventSink, RouterClient};
use clientstatus_core::{IntervalTicker, Monitor};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = AgentConfig::load().await.context("Failed to load configuration")?;
    init_logging(config.poll.debug);
    info!("Client status agent starting (interval {}s)", config.poll.interval_secs);
    debug!("DEBUG ENABLED");

    let router = RouterClient::new(&config.router).context("Failed to create router client")?;
    let events = MqttEventSink::connect(&config.mqtt);

    let mut monitor = Monitor::start(router, events, &config.models.without_wan)
        .await
        .context("Failed to read device model")?;
    monitor.events().set_model(monitor.profile().model());

    let mut ticker = IntervalTicker::new(config.poll.interval());
    monitor.run(&mut ticker).await;

    Ok(())
}
