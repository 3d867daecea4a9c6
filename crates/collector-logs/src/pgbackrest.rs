//! pgBackRest log collection on a dedicated repository host.

use crate::components::{
    file_storage, logs_exporters, logs_processors, resource_attributes, transform,
};
use crate::feature::{FeatureGate, OPEN_TELEMETRY_LOGS};
use crate::instrumentation::{BackupRepo, InstrumentationSpec};
use crate::naming::{PGBACKREST_CONTAINER, pgbackrest_repo_log_directory};
use crate::transforms::PGBACKREST_LOGS_TRANSFORMS;
use collector_config::{ComponentId, Config, Pipeline, Value, mapping};

/// A new line starts with a log timestamp, or with the 19 dashes of the
/// banner pgBackRest prints when a process starts:
/// `-------------------PROCESS START-------------------`
pub const LINE_START_PATTERN: &str = r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}|^-{19}";

/// Add the `logs/pgbackrest` pipeline and its components to `config`.
///
/// Logs are read from the first repository stored on a volume. Without such
/// a repository there is nowhere to read from, and nothing is added.
pub fn enable_pgbackrest_logging(
    gate: &FeatureGate,
    spec: Option<&InstrumentationSpec>,
    repos: &[BackupRepo],
    config: &mut Config,
) {
    if !gate.enabled(OPEN_TELEMETRY_LOGS) {
        tracing::debug!(source = "pgbackrest", "Log collection disabled");
        return;
    }

    let Some(repo) = repos.iter().find(|repo| repo.volume.is_some()) else {
        tracing::debug!(source = "pgbackrest", "No repository volume; skipping log collection");
        return;
    };
    let directory = pgbackrest_repo_log_directory(&repo.name);

    let storage = ComponentId::new("file_storage", "pgbackrest_logs");
    let receiver = ComponentId::new("filelog", "pgbackrest_log");
    let resource = ComponentId::new("resource", "pgbackrest");
    let transformer = ComponentId::new("transform", "pgbackrest_logs");

    config.add_extension(storage.clone(), file_storage(&directory));

    config.add_receiver(
        receiver.clone(),
        mapping([
            ("include", Value::from(vec![format!("{directory}/*.log")])),
            ("storage", Value::from(storage.as_str())),
            (
                "multiline",
                mapping([("line_start_pattern", Value::from(LINE_START_PATTERN))]),
            ),
        ]),
    );

    config.add_processor(resource.clone(), resource_attributes(PGBACKREST_CONTAINER));
    config.add_processor(transformer.clone(), transform(&PGBACKREST_LOGS_TRANSFORMS));

    config.add_pipeline(
        "logs/pgbackrest",
        Pipeline {
            extensions: vec![storage],
            receivers: vec![receiver],
            processors: logs_processors(&resource, &transformer),
            exporters: logs_exporters(spec),
        },
    );
    tracing::debug!(source = "pgbackrest", repo = %repo.name, "Added log pipeline");
}
