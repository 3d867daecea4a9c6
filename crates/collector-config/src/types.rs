//! Component identifiers and pipeline wiring.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A namespaced component name such as `filelog/patroni_jsonlog`.
///
/// The identifier is compared, hashed, and ordered by its exact string value.
/// No normalization happens: `Debug` and `debug` are different components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Separator between the component kind and its name.
    pub const SEPARATOR: char = '/';

    /// Create an identifier of the form `kind/name`.
    pub fn new(kind: &str, name: &str) -> Self {
        Self(format!("{kind}{}{name}", Self::SEPARATOR))
    }

    /// The identifier as it appears in the rendered document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The four component sections of a collector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Extensions,
    Receivers,
    Processors,
    Exporters,
}

impl Section {
    /// All sections, in the order pipelines list them.
    pub const ALL: [Section; 4] = [
        Section::Extensions,
        Section::Receivers,
        Section::Processors,
        Section::Exporters,
    ];

    /// Look up a section by its top-level key.
    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| section.key() == key)
    }

    /// The top-level key for this section.
    pub fn key(self) -> &'static str {
        match self {
            Section::Extensions => "extensions",
            Section::Receivers => "receivers",
            Section::Processors => "processors",
            Section::Exporters => "exporters",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One data-flow path through the collector.
///
/// Receivers feed processors in listed order, which feed exporters.
/// The order of `extensions` carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub extensions: Vec<ComponentId>,
    pub receivers: Vec<ComponentId>,
    pub processors: Vec<ComponentId>,
    pub exporters: Vec<ComponentId>,
}

impl Pipeline {
    /// The identifiers listed in one slot.
    pub fn slot(&self, section: Section) -> &[ComponentId] {
        match section {
            Section::Extensions => &self.extensions,
            Section::Receivers => &self.receivers,
            Section::Processors => &self.processors,
            Section::Exporters => &self.exporters,
        }
    }

    /// Mutable access to one slot.
    pub fn slot_mut(&mut self, section: Section) -> &mut Vec<ComponentId> {
        match section {
            Section::Extensions => &mut self.extensions,
            Section::Receivers => &mut self.receivers,
            Section::Processors => &mut self.processors,
            Section::Exporters => &mut self.exporters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_component_id_new_joins_kind_and_name() {
        let id = ComponentId::new("filelog", "patroni_jsonlog");
        assert_eq!(id.as_str(), "filelog/patroni_jsonlog");
        assert_eq!(id.to_string(), "filelog/patroni_jsonlog");
    }

    #[test]
    fn test_component_id_is_case_sensitive() {
        assert_ne!(ComponentId::from("debug"), ComponentId::from("Debug"));
        assert_ne!(ComponentId::from("debug"), ComponentId::from(" debug"));
    }

    #[test]
    fn test_component_id_map_lookup_by_str() {
        let mut map = IndexMap::new();
        map.insert(ComponentId::from("debug"), 1);

        assert_eq!(map.get("debug"), Some(&1));
        assert!(!map.contains_key("batch/logs"));
    }

    #[test]
    fn test_section_from_key() {
        assert_eq!(Section::from_key("exporters"), Some(Section::Exporters));
        assert_eq!(Section::from_key("pipelines"), None);
        assert_eq!(Section::from_key("Exporters"), None);
    }

    #[test]
    fn test_pipeline_slots() {
        let mut pipeline = Pipeline::default();
        pipeline
            .slot_mut(Section::Exporters)
            .push(ComponentId::from("debug"));

        assert_eq!(pipeline.exporters, vec![ComponentId::from("debug")]);
        assert!(pipeline.slot(Section::Receivers).is_empty());
    }
}
