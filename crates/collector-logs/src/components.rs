//! Settings shared by the log-source builders.

use crate::instrumentation::InstrumentationSpec;
use crate::naming::receiver_storage_directory;
use collector_config::{
    COMPACTING_PROCESSOR, ComponentId, DEBUG_EXPORTER, LOGS_BATCH_PROCESSOR,
    RESOURCE_DETECTION_PROCESSOR, Value, mapping,
};

/// A `file_storage` extension that keeps reader checkpoints next to the logs.
///
/// <https://github.com/open-telemetry/opentelemetry-collector-contrib/blob/-/extension/storage/filestorage#readme>
pub(crate) fn file_storage(log_directory: &str) -> Value {
    mapping([
        (
            "directory",
            Value::from(receiver_storage_directory(log_directory)),
        ),
        ("create_directory", Value::from(true)),
        ("fsync", Value::from(true)),
    ])
}

/// A `resource` processor naming the container, namespace, and pod.
///
/// Namespace and pod are `${env:...}` placeholders that the collector
/// expands at its own startup.
pub(crate) fn resource_attributes(container: &str) -> Value {
    // Container and namespace names are DNS labels and pod names are DNS
    // subdomains, so none of them need escaping.
    // https://github.com/open-telemetry/semantic-conventions/blob/v1.29.0/docs/resource/k8s.md
    let insert = |key: &str, value: &str| {
        mapping([
            ("action", Value::from("insert")),
            ("key", Value::from(key)),
            ("value", Value::from(value)),
        ])
    };

    mapping([(
        "attributes",
        Value::Sequence(vec![
            insert("k8s.container.name", container),
            insert("k8s.namespace.name", "${env:K8S_POD_NAMESPACE}"),
            insert("k8s.pod.name", "${env:K8S_POD_NAME}"),
        ]),
    )])
}

/// A `transform` processor running pre-authored statements.
///
/// <https://github.com/open-telemetry/opentelemetry-collector-contrib/blob/-/processor/transformprocessor#readme>
pub(crate) fn transform(statements: &Value) -> Value {
    mapping([("log_statements", statements.clone())])
}

/// Processors of a logs pipeline, in the order records pass through them.
pub(crate) fn logs_processors(resource: &ComponentId, transform: &ComponentId) -> Vec<ComponentId> {
    vec![
        resource.clone(),
        transform.clone(),
        RESOURCE_DETECTION_PROCESSOR.into(),
        LOGS_BATCH_PROCESSOR.into(),
        COMPACTING_PROCESSOR.into(),
    ]
}

/// Exporters of a logs pipeline: the requested ones, or `debug` when none are.
pub(crate) fn logs_exporters(spec: Option<&InstrumentationSpec>) -> Vec<ComponentId> {
    spec.and_then(InstrumentationSpec::log_exporters)
        .filter(|exporters| !exporters.is_empty())
        .map(<[ComponentId]>::to_vec)
        .unwrap_or_else(|| vec![DEBUG_EXPORTER.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrumentation::InstrumentationLogsSpec;

    #[test]
    fn test_file_storage_settings() {
        let settings = file_storage("/logs");

        assert_eq!(settings["directory"], Value::from("/logs/receiver"));
        assert_eq!(settings["create_directory"], Value::from(true));
        assert_eq!(settings["fsync"], Value::from(true));
    }

    #[test]
    fn test_resource_attributes_order() {
        let settings = resource_attributes("database");
        let keys: Vec<&str> = settings["attributes"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|attribute| attribute["key"].as_str().unwrap())
            .collect();

        assert_eq!(
            keys,
            vec!["k8s.container.name", "k8s.namespace.name", "k8s.pod.name"]
        );
        assert_eq!(settings["attributes"][0]["value"], Value::from("database"));
        assert_eq!(
            settings["attributes"][2]["value"],
            Value::from("${env:K8S_POD_NAME}")
        );
    }

    #[test]
    fn test_logs_exporters_default_to_debug() {
        assert_eq!(logs_exporters(None), vec![ComponentId::from(DEBUG_EXPORTER)]);
        assert_eq!(
            logs_exporters(Some(&InstrumentationSpec::default())),
            vec![ComponentId::from(DEBUG_EXPORTER)]
        );

        let empty = InstrumentationSpec {
            config: None,
            logs: Some(InstrumentationLogsSpec {
                exporters: Some(vec![]),
            }),
        };
        assert_eq!(
            logs_exporters(Some(&empty)),
            vec![ComponentId::from(DEBUG_EXPORTER)]
        );
    }

    #[test]
    fn test_logs_exporters_from_spec() {
        let spec = InstrumentationSpec {
            config: None,
            logs: Some(InstrumentationLogsSpec {
                exporters: Some(vec!["googlecloud".into()]),
            }),
        };

        assert_eq!(
            logs_exporters(Some(&spec)),
            vec![ComponentId::from("googlecloud")]
        );
    }
}
