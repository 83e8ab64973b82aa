//! Telemetry initialization and configuration

use std::error::Error;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Filter used when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_FILTER: &str = "info";

/// How logs and traces leave the process.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    /// `EnvFilter` directive, e.g. `info` or `adgen_graph=debug,info`.
    /// `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
    /// Emit newline-delimited JSON instead of human-readable lines.
    pub json: bool,
    /// OTLP collector endpoint (e.g. `http://localhost:4317`).
    pub otlp_endpoint: Option<String>,
}

impl TelemetryConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), log_filter: None, json: false, otlp_endpoint: None }
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }
}

/// Initialize console logging for `service_name`.
///
/// # Example
/// ```
/// use adgen_telemetry::init_telemetry;
/// init_telemetry("adgen-test").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn Error>> {
    init(&TelemetryConfig::new(service_name))
}

/// Initialize console logging plus OTLP span export.
///
/// Must be called from within a Tokio runtime.
pub fn init_with_otlp(service_name: &str, endpoint: &str) -> Result<(), Box<dyn Error>> {
    init(&TelemetryConfig::new(service_name).with_otlp_endpoint(endpoint))
}

/// Initialize telemetry from a [`TelemetryConfig`]. Only the first call in a
/// process has any effect.
pub fn init(config: &TelemetryConfig) -> Result<(), Box<dyn Error>> {
    let mut outcome: Result<(), Box<dyn Error>> = Ok(());
    INIT.call_once(|| {
        outcome = install(config);
    });
    outcome
}

/// Flush pending spans. Call before exiting when OTLP export is enabled.
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

fn env_filter(directive: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn install(config: &TelemetryConfig) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(config.log_filter.as_deref());

    let plain = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
    });
    let json = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
    });

    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            let tracer = otlp_tracer(&config.service_name, endpoint)?;
            Some(tracing_opentelemetry::OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    tracing_subscriber::registry().with(filter).with(plain).with(json).with(otel_layer).try_init()?;

    tracing::info!(
        service.name = %config.service_name,
        otlp.endpoint = config.otlp_endpoint.as_deref().unwrap_or("disabled"),
        "Telemetry initialized"
    );
    Ok(())
}

fn otlp_tracer(
    service_name: &str,
    endpoint: &str,
) -> Result<opentelemetry_sdk::trace::Tracer, Box<dyn Error>> {
    use opentelemetry_otlp::WithExportConfig;

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
        .with_trace_config(opentelemetry_sdk::trace::config().with_resource(
            opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                "service.name",
                service_name.to_string(),
            )]),
        ))
        .install_batch(opentelemetry_sdk::runtime::Tokio)?;
    Ok(tracer)
}
