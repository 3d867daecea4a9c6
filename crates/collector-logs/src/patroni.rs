//! Patroni log collection.

use crate::components::{
    file_storage, logs_exporters, logs_processors, resource_attributes, transform,
};
use crate::feature::{FeatureGate, OPEN_TELEMETRY_LOGS};
use crate::instrumentation::InstrumentationSpec;
use crate::naming::{DATABASE_CONTAINER, PATRONI_LOG_DIRECTORY};
use crate::transforms::PATRONI_LOGS_TRANSFORMS;
use collector_config::{ComponentId, Config, Pipeline, Value, mapping};

/// Add the `logs/patroni` pipeline and its components to `config`.
///
/// Patroni always logs inside the Postgres data volume, so the only
/// condition is the [`OPEN_TELEMETRY_LOGS`] gate.
pub fn enable_patroni_logging(
    gate: &FeatureGate,
    spec: Option<&InstrumentationSpec>,
    config: &mut Config,
) {
    if !gate.enabled(OPEN_TELEMETRY_LOGS) {
        tracing::debug!(source = "patroni", "Log collection disabled");
        return;
    }

    let storage = ComponentId::new("file_storage", "patroni_logs");
    let receiver = ComponentId::new("filelog", "patroni_jsonlog");
    let resource = ComponentId::new("resource", "patroni");
    let transformer = ComponentId::new("transform", "patroni_logs");

    // Keep track of what log records and files have been processed.
    config.add_extension(storage.clone(), file_storage(PATRONI_LOG_DIRECTORY));

    // https://github.com/open-telemetry/opentelemetry-collector-contrib/blob/-/receiver/filelogreceiver#readme
    config.add_receiver(
        receiver.clone(),
        mapping([
            (
                "include",
                Value::from(vec![format!("{PATRONI_LOG_DIRECTORY}/*.log")]),
            ),
            ("storage", Value::from(storage.as_str())),
            // Keep the raw JSON line; the transform parses it from here.
            (
                "operators",
                Value::Sequence(vec![mapping([
                    ("type", Value::from("move")),
                    ("from", Value::from("body")),
                    ("to", Value::from("body.original")),
                ])]),
            ),
        ]),
    );

    config.add_processor(resource.clone(), resource_attributes(DATABASE_CONTAINER));
    config.add_processor(transformer.clone(), transform(&PATRONI_LOGS_TRANSFORMS));

    config.add_pipeline(
        "logs/patroni",
        Pipeline {
            extensions: vec![storage],
            receivers: vec![receiver],
            processors: logs_processors(&resource, &transformer),
            exporters: logs_exporters(spec),
        },
    );
    tracing::debug!(source = "patroni", "Added log pipeline");
}
