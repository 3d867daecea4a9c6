//! Per-cluster inputs to collector generation.

use collector_config::{ComponentId, Value};
use serde::Deserialize;

/// How a cluster asks for its telemetry to be collected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentationSpec {
    /// Collector settings merged over the generated defaults.
    ///
    /// Shaped like the collector document: component sections,
    /// `pipelines`, and any other sections to pass through.
    #[serde(default)]
    pub config: Option<Value>,

    #[serde(default)]
    pub logs: Option<InstrumentationLogsSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentationLogsSpec {
    /// Exporters that receive every log pipeline, in place of `debug`.
    #[serde(default)]
    pub exporters: Option<Vec<ComponentId>>,
}

impl InstrumentationSpec {
    /// The override document, if one was given.
    pub fn overrides(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    /// Exporters requested for log pipelines.
    pub fn log_exporters(&self) -> Option<&[ComponentId]> {
        self.logs.as_ref()?.exporters.as_deref()
    }
}

/// A pgBackRest repository as seen by the repository host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRepo {
    pub name: String,

    /// Present when the repository is stored on a volume of the repo host.
    #[serde(default)]
    pub volume: Option<RepoVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoVolume {
    /// Name of the claim backing the repository, if already known.
    #[serde(default)]
    pub claim_name: Option<String>,
}
