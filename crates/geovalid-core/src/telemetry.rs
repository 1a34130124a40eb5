use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with an env-filtered fmt subscriber.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "geovalid=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Telemetry initialized");
    Ok(())
}
