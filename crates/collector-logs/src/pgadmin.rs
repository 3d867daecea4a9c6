//! pgAdmin and gunicorn log collection.
//!
//! pgAdmin and the gunicorn server hosting it write separate files in the
//! same directory and the same JSON format. Each file gets its own receiver
//! and pipeline; the storage extension and the resource and transform
//! processors are shared.

use crate::components::{
    file_storage, logs_exporters, logs_processors, resource_attributes, transform,
};
use crate::feature::{FeatureGate, OPEN_TELEMETRY_LOGS};
use crate::instrumentation::InstrumentationSpec;
use crate::naming::{GUNICORN_LOG_FILE, PGADMIN_CONTAINER, PGADMIN_LOG_DIRECTORY, PGADMIN_LOG_FILE};
use crate::transforms::PGADMIN_LOGS_TRANSFORMS;
use collector_config::{ComponentId, Config, Pipeline, Value, mapping};

/// Add the `logs/pgadmin` and `logs/gunicorn` pipelines to `config`.
pub fn enable_pgadmin_logging(
    gate: &FeatureGate,
    spec: Option<&InstrumentationSpec>,
    config: &mut Config,
) {
    if !gate.enabled(OPEN_TELEMETRY_LOGS) {
        tracing::debug!(source = "pgadmin", "Log collection disabled");
        return;
    }

    let storage = ComponentId::new("file_storage", "pgadmin_data_logs");
    let resource = ComponentId::new("resource", "pgadmin");
    let transformer = ComponentId::new("transform", "pgadmin_log");

    config.add_extension(storage.clone(), file_storage(PGADMIN_LOG_DIRECTORY));
    config.add_processor(resource.clone(), resource_attributes(PGADMIN_CONTAINER));
    config.add_processor(transformer.clone(), transform(&PGADMIN_LOGS_TRANSFORMS));

    for (name, file) in [("pgadmin", PGADMIN_LOG_FILE), ("gunicorn", GUNICORN_LOG_FILE)] {
        let receiver = ComponentId::new("filelog", name);
        config.add_receiver(
            receiver.clone(),
            mapping([
                ("include", Value::from(vec![file])),
                ("storage", Value::from(storage.as_str())),
            ]),
        );

        config.add_pipeline(
            format!("logs/{name}"),
            Pipeline {
                extensions: vec![storage.clone()],
                receivers: vec![receiver],
                processors: logs_processors(&resource, &transformer),
                exporters: logs_exporters(spec),
            },
        );
        tracing::debug!(source = name, "Added log pipeline");
    }
}
