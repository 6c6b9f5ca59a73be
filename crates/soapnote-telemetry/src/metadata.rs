use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;
use soapnote_config::TelemetryConfig;

/// Resource describing this process to the collector
///
/// Configured attributes are appended after the service name and version,
/// so they cannot displace either.
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    let attrs = [
        KeyValue::new(semconv::SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ]
    .into_iter()
    .chain(
        config
            .resource_attributes
            .iter()
            .filter(|(key, _)| key.as_str() != semconv::SERVICE_NAME && key.as_str() != semconv::SERVICE_VERSION)
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone())),
    );

    Resource::builder().with_attributes(attrs).build()
}
