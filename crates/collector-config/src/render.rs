//! Canonical YAML rendering.
//!
//! Two documents with the same content always render to the same text:
//! mapping keys are sorted at every depth, while sequences keep their order.
//! Scalars are written as they are stored, so durations such as `200ms`
//! stay plain strings.

use crate::config::Config;
use crate::error::Result;
use crate::types::{ComponentId, Section};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Banner written above every rendered document.
pub const GENERATED_HEADER: &str =
    "# Generated by postgres-operator. DO NOT EDIT.\n# Your changes will not be saved.\n";

/// Render `config` as a collector configuration file.
///
/// Pipelines are written under `service.pipelines`. The extensions they use
/// and those enabled by the override are collected into `service.extensions`. Component sections are always
/// present, rendering as `{}` when empty.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Serialize`] if the YAML writer fails.
pub fn render(config: &Config) -> Result<String> {
    let document = canonicalize(document_value(config));
    let body = serde_yaml::to_string(&document)?;
    Ok(format!("{GENERATED_HEADER}{body}"))
}

/// Lay out the document the way the collector reads it.
fn document_value(config: &Config) -> Value {
    let mut root = config.passthrough().clone();

    for section in Section::ALL {
        root.insert(
            Value::from(section.key()),
            component_mapping(config.components(section)),
        );
    }

    let mut service = match root.remove("service") {
        Some(Value::Mapping(service)) => service,
        _ => Mapping::new(),
    };

    let extensions: BTreeSet<&ComponentId> = config
        .pipelines()
        .values()
        .flat_map(|pipeline| &pipeline.extensions)
        .chain(config.service_extensions())
        .collect();
    service.insert(
        Value::from("extensions"),
        Value::Sequence(extensions.into_iter().map(id_value).collect()),
    );

    let pipelines: Mapping = config
        .pipelines()
        .iter()
        .map(|(name, pipeline)| {
            let wiring: Mapping = [Section::Receivers, Section::Processors, Section::Exporters]
                .into_iter()
                .map(|section| {
                    (
                        Value::from(section.key()),
                        Value::Sequence(pipeline.slot(section).iter().map(id_value).collect()),
                    )
                })
                .collect();
            (Value::from(name.as_str()), Value::Mapping(wiring))
        })
        .collect();
    service.insert(Value::from("pipelines"), Value::Mapping(pipelines));

    root.insert(Value::from("service"), Value::Mapping(service));
    Value::Mapping(root)
}

fn component_mapping(components: &IndexMap<ComponentId, Value>) -> Value {
    Value::Mapping(
        components
            .iter()
            .map(|(id, settings)| (id_value(id), settings.clone()))
            .collect(),
    )
}

fn id_value(id: &ComponentId) -> Value {
    Value::from(id.as_str())
}

/// Sort mapping keys recursively.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Mapping(entries) => {
            let mut entries: Vec<(Value, Value)> = entries
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect();
            entries.sort_by(|(a, _), (b, _)| {
                key_text(a)
                    .cmp(&key_text(b))
                    .then_with(|| key_rank(a).cmp(&key_rank(b)))
            });
            Value::Mapping(entries.into_iter().collect())
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(canonicalize).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = canonicalize(std::mem::take(&mut tagged.value));
            Value::Tagged(tagged)
        }
        scalar => scalar,
    }
}

/// The text a key is ordered by.
fn key_text(key: &Value) -> Cow<'_, str> {
    match key {
        Value::String(text) => Cow::Borrowed(text),
        Value::Number(number) => Cow::Owned(number.to_string()),
        Value::Bool(flag) => Cow::Owned(flag.to_string()),
        Value::Null => Cow::Borrowed("~"),
        other => Cow::Owned(format!("{other:?}")),
    }
}

/// Orders keys whose text is the same, such as `1` and `'1'`.
fn key_rank(key: &Value) -> u8 {
    match key {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Sequence(_) => 4,
        Value::Mapping(_) => 5,
        Value::Tagged(_) => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEBUG_EXPORTER, LOGS_BATCH_PROCESSOR, mapping};
    use crate::types::Pipeline;
    use pretty_assertions::assert_eq;

    fn small_config(reverse: bool) -> Config {
        let mut config = Config::default();
        let mut steps: Vec<Box<dyn Fn(&mut Config)>> = vec![
            Box::new(|c: &mut Config| {
                c.add_exporter(
                    DEBUG_EXPORTER,
                    mapping([("verbosity", Value::from("detailed"))]),
                )
            }),
            Box::new(|c: &mut Config| {
                c.add_processor(
                    LOGS_BATCH_PROCESSOR,
                    mapping([
                        ("timeout", Value::from("200ms")),
                        ("send_batch_size", Value::from(8192)),
                    ]),
                )
            }),
            Box::new(|c: &mut Config| {
                c.add_processor("groupbyattrs/compact", Value::Mapping(Mapping::new()))
            }),
            Box::new(|c: &mut Config| {
                c.add_extension(
                    "file_storage/x_logs",
                    mapping([
                        ("fsync", Value::from(true)),
                        ("directory", Value::from("/x/receiver")),
                    ]),
                )
            }),
            Box::new(|c: &mut Config| {
                c.add_receiver(
                    "filelog/x",
                    mapping([
                        ("storage", Value::from("file_storage/x_logs")),
                        ("include", Value::from(vec!["/x/b.log", "/x/a.log"])),
                    ]),
                )
            }),
            Box::new(|c: &mut Config| {
                c.add_pipeline(
                    "logs/x",
                    Pipeline {
                        extensions: vec!["file_storage/x_logs".into()],
                        receivers: vec!["filelog/x".into()],
                        processors: vec![
                            LOGS_BATCH_PROCESSOR.into(),
                            "groupbyattrs/compact".into(),
                        ],
                        exporters: vec![DEBUG_EXPORTER.into()],
                    },
                )
            }),
        ];
        if reverse {
            steps.reverse();
        }
        for step in steps {
            step(&mut config);
        }
        config
    }

    #[test]
    fn test_render_empty_config() {
        let rendered = render(&Config::default()).unwrap();

        assert_eq!(
            rendered,
            "# Generated by postgres-operator. DO NOT EDIT.
# Your changes will not be saved.
exporters: {}
extensions: {}
processors: {}
receivers: {}
service:
  extensions: []
  pipelines: {}
"
        );
    }

    #[test]
    fn test_render_sorts_keys_and_keeps_sequence_order() {
        let rendered = render(&small_config(false)).unwrap();

        assert_eq!(
            rendered,
            "# Generated by postgres-operator. DO NOT EDIT.
# Your changes will not be saved.
exporters:
  debug:
    verbosity: detailed
extensions:
  file_storage/x_logs:
    directory: /x/receiver
    fsync: true
processors:
  batch/logs:
    send_batch_size: 8192
    timeout: 200ms
  groupbyattrs/compact: {}
receivers:
  filelog/x:
    include:
    - /x/b.log
    - /x/a.log
    storage: file_storage/x_logs
service:
  extensions:
  - file_storage/x_logs
  pipelines:
    logs/x:
      exporters:
      - debug
      processors:
      - batch/logs
      - groupbyattrs/compact
      receivers:
      - filelog/x
"
        );
    }

    #[test]
    fn test_render_ignores_insertion_order() {
        assert_eq!(
            render(&small_config(false)).unwrap(),
            render(&small_config(true)).unwrap()
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let config = small_config(false);
        assert_eq!(render(&config).unwrap(), render(&config).unwrap());
        assert_eq!(config.to_yaml().unwrap(), render(&config).unwrap());
    }

    #[test]
    fn test_render_deduplicates_service_extensions() {
        let mut config = small_config(false);
        config.add_pipeline(
            "logs/y",
            Pipeline {
                extensions: vec!["file_storage/x_logs".into(), "file_storage/a_logs".into()],
                ..Pipeline::default()
            },
        );

        let rendered: Value = serde_yaml::from_str(&render(&config).unwrap()).unwrap();

        assert_eq!(
            rendered["service"]["extensions"],
            Value::from(vec!["file_storage/a_logs", "file_storage/x_logs"])
        );
    }

    #[test]
    fn test_render_keeps_passthrough_sections() {
        let overrides: Value = serde_yaml::from_str(
            r#"
connectors:
  count: {}
service:
  telemetry:
    logs:
      level: warn
"#,
        )
        .unwrap();
        let config = Config::new(Some(&overrides)).unwrap();

        let rendered: Value = serde_yaml::from_str(&render(&config).unwrap()).unwrap();

        assert_eq!(
            rendered["connectors"],
            mapping([("count", Value::Mapping(Mapping::new()))])
        );
        assert_eq!(
            rendered["service"]["telemetry"]["logs"]["level"],
            Value::from("warn")
        );
        assert_eq!(rendered["service"]["pipelines"], Value::Mapping(Mapping::new()));
    }

    #[test]
    fn test_render_service_wiring_from_override() {
        let overrides: Value = serde_yaml::from_str(
            r#"
extensions:
  health_check: {}
service:
  extensions: [health_check]
  pipelines:
    logs/native:
      receivers: [filelog/x]
      exporters: [debug]
"#,
        )
        .unwrap();
        let config = crate::merge::merge(small_config(false), Some(&overrides)).unwrap();

        let rendered: Value = serde_yaml::from_str(&render(&config).unwrap()).unwrap();

        assert_eq!(
            rendered["service"]["extensions"],
            Value::from(vec!["file_storage/x_logs", "health_check"])
        );
        assert_eq!(
            rendered["service"]["pipelines"]["logs/native"]["receivers"],
            Value::from(vec!["filelog/x"])
        );
    }

    #[test]
    fn test_render_orders_keys_of_different_kinds() {
        let render_settings = |settings: &str| {
            let mut config = Config::default();
            config.add_exporter("x", serde_yaml::from_str(settings).unwrap());
            render(&config).unwrap()
        };

        let forward = render_settings("{1: a, '1': b, true: c, 'true': d}");
        let backward = render_settings("{'true': d, true: c, '1': b, 1: a}");

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_canonicalize_nested_mappings() {
        let value: Value = serde_yaml::from_str("{b: {z: 1, a: 2}, a: [{y: 1, x: 2}]}").unwrap();

        let keys = |value: &Value| -> Vec<String> {
            value
                .as_mapping()
                .unwrap()
                .keys()
                .map(|key| key.as_str().unwrap().to_string())
                .collect()
        };

        let sorted = canonicalize(value);
        assert_eq!(keys(&sorted), vec!["a", "b"]);

        let mixed = canonicalize(serde_yaml::from_str("{'1': b, 1: a}").unwrap());
        let kinds: Vec<&Value> = mixed.as_mapping().unwrap().keys().collect();
        assert_eq!(kinds, vec![&Value::from(1), &Value::from("1")]);
        assert_eq!(keys(&sorted["b"]), vec!["a", "z"]);
        assert_eq!(keys(&sorted["a"][0]), vec!["x", "y"]);
    }
}
