//! The collector configuration document.
//!
//! A [`Config`] holds the four component mappings, the named pipelines that
//! wire them together, and any top-level sections of an override document
//! that this crate does not interpret.
//!
//! Documents are assembled in a fixed order:
//!
//! 1. [`Config::new`] seeds the shared defaults and a copy of the override.
//! 2. Log-source builders add their components and pipelines.
//! 3. [`crate::merge`] applies the override again so user settings win.
//! 4. [`Config::validate`] checks that every pipeline reference resolves.

use crate::error::{ConfigError, Result};
use crate::merge::merge;
use crate::render::render;
use crate::types::{ComponentId, Pipeline, Section};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

/// Exporter that prints records to the collector's own output.
pub const DEBUG_EXPORTER: &str = "debug";

/// Batch processor flushing every second.
pub const ONE_SECOND_BATCH_PROCESSOR: &str = "batch/1s";

/// Batch processor flushing every 200 milliseconds.
pub const SUB_SECOND_BATCH_PROCESSOR: &str = "batch/200ms";

/// Batch processor used by every logs pipeline.
pub const LOGS_BATCH_PROCESSOR: &str = "batch/logs";

/// Processor that regroups records sharing the same resource attributes.
pub const COMPACTING_PROCESSOR: &str = "groupbyattrs/compact";

/// Processor that attaches host and platform attributes.
pub const RESOURCE_DETECTION_PROCESSOR: &str = "resourcedetection";

/// Build a settings mapping from string keys.
pub fn mapping<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect(),
    )
}

/// A collector configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub(crate) extensions: IndexMap<ComponentId, Value>,
    pub(crate) receivers: IndexMap<ComponentId, Value>,
    pub(crate) processors: IndexMap<ComponentId, Value>,
    pub(crate) exporters: IndexMap<ComponentId, Value>,
    pub(crate) pipelines: IndexMap<String, Pipeline>,
    /// Extensions enabled even when no pipeline uses them.
    pub(crate) service_extensions: Vec<ComponentId>,
    /// Top-level override sections passed through untouched.
    pub(crate) passthrough: Mapping,
}

impl Config {
    /// Create a document holding the shared defaults and a copy of `overrides`.
    ///
    /// Components named in the override replace shared defaults of the same
    /// name, and pipelines it declares are kept so that builders can add
    /// their wiring alongside them.
    ///
    /// # Errors
    ///
    /// Fails if the override is not a mapping, or if a section this crate
    /// interprets has the wrong shape.
    pub fn new(overrides: Option<&Value>) -> Result<Self> {
        merge(Self::shared(), overrides)
    }

    /// Components every generated document starts with.
    fn shared() -> Self {
        let mut config = Self::default();

        config.add_exporter(
            DEBUG_EXPORTER,
            mapping([("verbosity", Value::from("detailed"))]),
        );

        config.add_processor(
            ONE_SECOND_BATCH_PROCESSOR,
            mapping([("timeout", Value::from("1s"))]),
        );
        config.add_processor(
            SUB_SECOND_BATCH_PROCESSOR,
            mapping([("timeout", Value::from("200ms"))]),
        );
        config.add_processor(
            LOGS_BATCH_PROCESSOR,
            mapping([
                ("send_batch_size", Value::from(8192)),
                ("timeout", Value::from("200ms")),
            ]),
        );

        // https://github.com/open-telemetry/opentelemetry-collector-contrib/blob/-/processor/groupbyattrsprocessor#readme
        config.add_processor(COMPACTING_PROCESSOR, Value::Mapping(Mapping::new()));

        // Detectors are chosen by the operator through overrides.
        config.add_processor(
            RESOURCE_DETECTION_PROCESSOR,
            mapping([
                ("detectors", Value::Sequence(Vec::new())),
                ("override", Value::from(false)),
                ("timeout", Value::from("30s")),
            ]),
        );

        config
    }

    pub fn add_extension(&mut self, id: impl Into<ComponentId>, settings: Value) {
        self.extensions.insert(id.into(), settings);
    }

    pub fn add_receiver(&mut self, id: impl Into<ComponentId>, settings: Value) {
        self.receivers.insert(id.into(), settings);
    }

    pub fn add_processor(&mut self, id: impl Into<ComponentId>, settings: Value) {
        self.processors.insert(id.into(), settings);
    }

    pub fn add_exporter(&mut self, id: impl Into<ComponentId>, settings: Value) {
        self.exporters.insert(id.into(), settings);
    }

    /// Insert or replace a pipeline.
    ///
    /// When a pipeline of the same name is already present with a non-empty
    /// exporter list, that list is kept. This lets an override choose the
    /// exporters of a pipeline whose other slots are generated.
    pub fn add_pipeline(&mut self, name: impl Into<String>, mut pipeline: Pipeline) {
        let name = name.into();
        if let Some(existing) = self.pipelines.get(&name) {
            if !existing.exporters.is_empty() {
                pipeline.exporters = existing.exporters.clone();
            }
        }
        self.pipelines.insert(name, pipeline);
    }

    /// The components of one section, in insertion order.
    pub fn components(&self, section: Section) -> &IndexMap<ComponentId, Value> {
        match section {
            Section::Extensions => &self.extensions,
            Section::Receivers => &self.receivers,
            Section::Processors => &self.processors,
            Section::Exporters => &self.exporters,
        }
    }

    pub(crate) fn components_mut(&mut self, section: Section) -> &mut IndexMap<ComponentId, Value> {
        match section {
            Section::Extensions => &mut self.extensions,
            Section::Receivers => &mut self.receivers,
            Section::Processors => &mut self.processors,
            Section::Exporters => &mut self.exporters,
        }
    }

    pub fn extensions(&self) -> &IndexMap<ComponentId, Value> {
        &self.extensions
    }

    pub fn receivers(&self) -> &IndexMap<ComponentId, Value> {
        &self.receivers
    }

    pub fn processors(&self) -> &IndexMap<ComponentId, Value> {
        &self.processors
    }

    pub fn exporters(&self) -> &IndexMap<ComponentId, Value> {
        &self.exporters
    }

    pub fn pipelines(&self) -> &IndexMap<String, Pipeline> {
        &self.pipelines
    }

    /// Extensions the override enables through `service.extensions`.
    pub fn service_extensions(&self) -> &[ComponentId] {
        &self.service_extensions
    }

    /// Override sections that are carried into the output as-is.
    pub fn passthrough(&self) -> &Mapping {
        &self.passthrough
    }

    /// Check that every pipeline is complete and every reference resolves.
    ///
    /// # Errors
    ///
    /// Pipelines are visited in insertion order. The first one without
    /// receivers or exporters yields [`ConfigError::EmptyPipelineSlot`],
    /// and the first undefined component yields
    /// [`ConfigError::DanglingReference`]. An undefined entry in
    /// `service.extensions` yields [`ConfigError::UndefinedServiceExtension`].
    pub fn validate(&self) -> Result<()> {
        for (name, pipeline) in &self.pipelines {
            for slot in [Section::Receivers, Section::Exporters] {
                if pipeline.slot(slot).is_empty() {
                    tracing::debug!(pipeline = %name, %slot, "Empty pipeline slot");
                    return Err(ConfigError::EmptyPipelineSlot {
                        pipeline: name.clone(),
                        slot,
                    });
                }
            }

            for section in Section::ALL {
                let defined = self.components(section);
                if let Some(missing) = pipeline
                    .slot(section)
                    .iter()
                    .find(|id| !defined.contains_key(id.as_str()))
                {
                    tracing::debug!(
                        pipeline = %name,
                        %section,
                        component = %missing,
                        "Undefined pipeline component"
                    );
                    return Err(ConfigError::DanglingReference {
                        pipeline: name.clone(),
                        section,
                        component: missing.clone(),
                    });
                }
            }
        }

        if let Some(missing) = self
            .service_extensions
            .iter()
            .find(|id| !self.extensions.contains_key(id.as_str()))
        {
            return Err(ConfigError::UndefinedServiceExtension {
                component: missing.clone(),
            });
        }
        Ok(())
    }

    /// Render this document as YAML. See [`render`].
    pub fn to_yaml(&self) -> Result<String> {
        render(self)
    }
}
