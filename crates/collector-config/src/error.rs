//! Errors raised while assembling, merging, or rendering a configuration.

use crate::types::{ComponentId, Section};
use thiserror::Error;

/// Result type alias for collector-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The override document is not a mapping at its top level.
    #[error("Override document must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of node that was found instead
        found: &'static str,
    },

    /// A section this generator interprets has the wrong shape.
    #[error("Override section `{section}` must be a mapping, found {found}")]
    InvalidSection {
        /// Top-level key of the section
        section: String,
        /// Kind of node that was found instead
        found: &'static str,
    },

    /// A pipeline definition in the override is not a mapping.
    #[error("Override pipeline `{pipeline}` must be a mapping, found {found}")]
    InvalidPipeline {
        pipeline: String,
        found: &'static str,
    },

    /// A pipeline slot in the override is not a sequence of component names.
    #[error("Override pipeline `{pipeline}` slot `{slot}` must be a sequence of component names")]
    InvalidPipelineSlot {
        pipeline: String,
        slot: Section,
    },

    /// A pipeline definition in the override has a key that is not a slot.
    #[error("Override pipeline `{pipeline}` has unknown key `{key}`")]
    UnknownPipelineKey { pipeline: String, key: String },

    /// `service.extensions` in the override is not a sequence of names.
    #[error("Override `service.extensions` must be a sequence of component names, found {found}")]
    InvalidServiceExtensions { found: &'static str },

    /// A pipeline names a component that is not defined.
    #[error("Pipeline `{pipeline}` references undefined {section} component `{component}`")]
    DanglingReference {
        pipeline: String,
        section: Section,
        component: ComponentId,
    },

    /// A pipeline has nothing to read from or nowhere to send to.
    #[error("Pipeline `{pipeline}` has no {slot}")]
    EmptyPipelineSlot { pipeline: String, slot: Section },

    /// `service.extensions` names an extension that is not defined.
    #[error("Service references undefined extensions component `{component}`")]
    UndefinedServiceExtension { component: ComponentId },

    /// The document could not be written as YAML.
    #[error("Failed to render configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Describe a YAML node for error messages.
pub(crate) fn node_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
