//! Folding an override document into a configuration.
//!
//! Override documents are loosely typed YAML. Only the sections this crate
//! interprets are validated:
//!
//! - `extensions`, `receivers`, `processors`, `exporters` must be mappings
//!   from component name to settings.
//! - `pipelines` must map pipeline names to mappings whose only keys are the
//!   `extensions`, `receivers`, `processors`, and `exporters` slots, each a
//!   sequence of names.
//! - `service.pipelines` is read the same way as `pipelines`, and
//!   `service.extensions` must be a sequence of names. Both may appear
//!   alongside the top-level form; later keys win slot by slot.
//!
//! Every other key, including the rest of `service`, is carried through
//! verbatim.
//!
//! # Merge policy
//!
//! | Part                | Policy                                  |
//! |---------------------|-----------------------------------------|
//! | Component mappings  | union of keys                           |
//! | Component settings  | override replaces the existing value    |
//! | Pipelines           | union of names                          |
//! | Pipeline slots      | override replaces when non-empty        |
//! | Service extensions  | union of names                          |
//! | Other sections      | override carried through verbatim       |

use crate::config::Config;
use crate::error::{ConfigError, Result, node_kind};
use crate::types::{ComponentId, Pipeline, Section};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;

/// An override document split into the parts this crate understands.
#[derive(Debug, Default)]
struct Overrides {
    components: Vec<(Section, IndexMap<ComponentId, Value>)>,
    pipelines: IndexMap<String, Pipeline>,
    service_extensions: Vec<ComponentId>,
    passthrough: Mapping,
}

impl Overrides {
    fn parse(document: Option<&Value>) -> Result<Self> {
        let mut overrides = Self::default();
        let entries = match document {
            None | Some(Value::Null) => return Ok(overrides),
            Some(Value::Mapping(entries)) => entries,
            Some(other) => {
                return Err(ConfigError::NotAMapping {
                    found: node_kind(other),
                });
            }
        };

        for (key, value) in entries {
            let name = key.as_str();
            if let Some(section) = name.and_then(Section::from_key) {
                overrides
                    .components
                    .push((section, parse_components(section, value)?));
            } else if name == Some("pipelines") {
                for (name, pipeline) in parse_pipelines("pipelines", value)? {
                    fold_pipeline(&mut overrides.pipelines, name, pipeline);
                }
            } else if name == Some("service") {
                overrides.parse_service(key, value)?;
            } else {
                overrides.passthrough.insert(key.clone(), value.clone());
            }
        }

        Ok(overrides)
    }

    /// Lift the wiring out of `service`, keeping its other keys.
    fn parse_service(&mut self, key: &Value, value: &Value) -> Result<()> {
        let mut service = section_mapping("service", value)?.into_owned();

        if let Some(pipelines) = service.remove("pipelines") {
            for (name, pipeline) in parse_pipelines("service.pipelines", &pipelines)? {
                fold_pipeline(&mut self.pipelines, name, pipeline);
            }
        }

        if let Some(extensions) = service.remove("extensions") {
            for id in parse_extension_list(&extensions)? {
                if !self.service_extensions.contains(&id) {
                    self.service_extensions.push(id);
                }
            }
        }

        if !service.is_empty() {
            self.passthrough.insert(key.clone(), Value::Mapping(service));
        }
        Ok(())
    }
}

/// Read a component section as a mapping of name to settings.
fn parse_components(section: Section, value: &Value) -> Result<IndexMap<ComponentId, Value>> {
    let entries = section_mapping(section.key(), value)?;
    entries
        .iter()
        .map(|(key, settings)| match key.as_str() {
            Some(name) => Ok((ComponentId::from(name), settings.clone())),
            None => Err(ConfigError::InvalidSection {
                section: section.key().to_string(),
                found: "a mapping with a non-string key",
            }),
        })
        .collect()
}

fn parse_pipelines(section: &str, value: &Value) -> Result<IndexMap<String, Pipeline>> {
    let entries = section_mapping(section, value)?;
    let mut pipelines = IndexMap::new();

    for (key, definition) in entries.iter() {
        let Some(name) = key.as_str() else {
            return Err(ConfigError::InvalidSection {
                section: section.to_string(),
                found: "a mapping with a non-string key",
            });
        };

        let slots = match definition {
            Value::Null => {
                pipelines.insert(name.to_string(), Pipeline::default());
                continue;
            }
            Value::Mapping(slots) => slots,
            other => {
                return Err(ConfigError::InvalidPipeline {
                    pipeline: name.to_string(),
                    found: node_kind(other),
                });
            }
        };

        if let Some(unknown) = slots
            .keys()
            .find(|key| key.as_str().and_then(Section::from_key).is_none())
        {
            return Err(ConfigError::UnknownPipelineKey {
                pipeline: name.to_string(),
                key: match unknown.as_str() {
                    Some(text) => text.to_string(),
                    None => format!("{unknown:?}"),
                },
            });
        }

        let mut pipeline = Pipeline::default();
        for section in Section::ALL {
            *pipeline.slot_mut(section) = match slots.get(section.key()) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Sequence(items)) => {
                    component_names(items).ok_or_else(|| ConfigError::InvalidPipelineSlot {
                        pipeline: name.to_string(),
                        slot: section,
                    })?
                }
                Some(_) => {
                    return Err(ConfigError::InvalidPipelineSlot {
                        pipeline: name.to_string(),
                        slot: section,
                    });
                }
            };
        }
        pipelines.insert(name.to_string(), pipeline);
    }

    Ok(pipelines)
}

fn parse_extension_list(value: &Value) -> Result<Vec<ComponentId>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => {
            component_names(items).ok_or(ConfigError::InvalidServiceExtensions {
                found: "a sequence with a non-string item",
            })
        }
        other => Err(ConfigError::InvalidServiceExtensions {
            found: node_kind(other),
        }),
    }
}

fn component_names(items: &[Value]) -> Option<Vec<ComponentId>> {
    items
        .iter()
        .map(|item| item.as_str().map(ComponentId::from))
        .collect()
}

/// A section may be omitted or left empty (`exporters:`), otherwise it must be a mapping.
fn section_mapping<'a>(section: &str, value: &'a Value) -> Result<Cow<'a, Mapping>> {
    match value {
        Value::Null => Ok(Cow::Owned(Mapping::new())),
        Value::Mapping(entries) => Ok(Cow::Borrowed(entries)),
        other => Err(ConfigError::InvalidSection {
            section: section.to_string(),
            found: node_kind(other),
        }),
    }
}

/// Add `replacement` to `pipelines`, or lay its non-empty slots over the
/// pipeline of the same name.
fn fold_pipeline(pipelines: &mut IndexMap<String, Pipeline>, name: String, replacement: Pipeline) {
    match pipelines.get_mut(&name) {
        Some(existing) => {
            for section in Section::ALL {
                let slot = replacement.slot(section);
                if !slot.is_empty() {
                    tracing::debug!(pipeline = %name, %section, "Replacing pipeline slot");
                    *existing.slot_mut(section) = slot.to_vec();
                }
            }
        }
        None => {
            pipelines.insert(name, replacement);
        }
    }
}

/// Fold `overrides` into `config`, returning the merged document.
///
/// - Components named by the override replace the existing settings whole;
///   there is no field-wise merge within a component.
/// - For a pipeline in both, each non-empty override slot replaces the
///   existing slot. Absent or empty slots keep the existing list.
/// - Pipelines only in the override are added as written.
/// - Extensions listed in `service.extensions` are enabled alongside the
///   ones pipelines use.
/// - Unrecognized top-level keys are carried through.
///
/// # Errors
///
/// Fails without returning a partial document when the override is
/// structurally invalid.
pub fn merge(mut config: Config, overrides: Option<&Value>) -> Result<Config> {
    let overrides = Overrides::parse(overrides)?;

    for (section, components) in overrides.components {
        tracing::debug!(%section, count = components.len(), "Applying component overrides");
        config.components_mut(section).extend(components);
    }

    for (name, replacement) in overrides.pipelines {
        fold_pipeline(&mut config.pipelines, name, replacement);
    }

    for id in overrides.service_extensions {
        if !config.service_extensions.contains(&id) {
            config.service_extensions.push(id);
        }
    }

    for (key, value) in overrides.passthrough {
        config.passthrough.insert(key, value);
    }

    Ok(config)
}
