//! Feature gates consulted by the log-source builders.
//!
//! Gates are passed to every builder explicitly. They can be set in code or
//! parsed from the comma-separated form used by operator environment
//! variables:
//!
//! ```
//! use collector_logs::feature::{FeatureGate, OPEN_TELEMETRY_LOGS};
//!
//! let gate: FeatureGate = "OpenTelemetryLogs=true".parse().unwrap();
//! assert!(gate.enabled(OPEN_TELEMETRY_LOGS));
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Forward database, pgAdmin, and pgBackRest logs through the collector.
pub const OPEN_TELEMETRY_LOGS: &str = "OpenTelemetryLogs";

/// Every feature this crate recognizes. All are disabled unless set.
pub const KNOWN_FEATURES: &[&str] = &[OPEN_TELEMETRY_LOGS];

/// A fixed set of enabled and disabled features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureGate {
    features: BTreeMap<&'static str, bool>,
}

impl FeatureGate {
    /// A gate with every feature at its default (disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable one feature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFeature`] for names not in [`KNOWN_FEATURES`].
    pub fn set(&mut self, feature: &str, enabled: bool) -> Result<()> {
        let known = KNOWN_FEATURES
            .iter()
            .copied()
            .find(|known| *known == feature)
            .ok_or_else(|| Error::UnknownFeature(feature.to_string()))?;
        self.features.insert(known, enabled);
        Ok(())
    }

    /// Builder-style variant of [`FeatureGate::set`].
    pub fn with(mut self, feature: &str, enabled: bool) -> Result<Self> {
        self.set(feature, enabled)?;
        Ok(self)
    }

    pub fn enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

impl FromStr for FeatureGate {
    type Err = Error;

    /// Parse `Name=true,Other=false`. Whitespace around entries is ignored
    /// and an empty string enables nothing.
    fn from_str(text: &str) -> Result<Self> {
        let mut gate = Self::new();
        for entry in text.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (feature, value) = entry
                .split_once('=')
                .ok_or_else(|| Error::MalformedFeatureGate(entry.to_string()))?;
            let (feature, value) = (feature.trim(), value.trim());
            let enabled = value.parse::<bool>().map_err(|_| Error::InvalidFeatureValue {
                feature: feature.to_string(),
                value: value.to_string(),
            })?;
            gate.set(feature, enabled)?;
        }
        Ok(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gate_disables_everything() {
        let gate = FeatureGate::new();
        assert!(!gate.enabled(OPEN_TELEMETRY_LOGS));
        assert!(!gate.enabled("SomethingElse"));
    }

    #[test]
    fn test_set_known_feature() {
        let gate = FeatureGate::new().with(OPEN_TELEMETRY_LOGS, true).unwrap();
        assert!(gate.enabled(OPEN_TELEMETRY_LOGS));
    }

    #[test]
    fn test_set_unknown_feature() {
        let err = FeatureGate::new().set("TabletopGames", true).unwrap_err();
        assert!(matches!(err, Error::UnknownFeature(name) if name == "TabletopGames"));
    }

    #[test]
    fn test_parse_gate_string() {
        let gate: FeatureGate = " OpenTelemetryLogs = true , ".parse().unwrap();
        assert!(gate.enabled(OPEN_TELEMETRY_LOGS));

        let gate: FeatureGate = "OpenTelemetryLogs=false".parse().unwrap();
        assert!(!gate.enabled(OPEN_TELEMETRY_LOGS));

        let gate: FeatureGate = "".parse().unwrap();
        assert_eq!(gate, FeatureGate::new());
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(matches!(
            "OpenTelemetryLogs".parse::<FeatureGate>(),
            Err(Error::MalformedFeatureGate(_))
        ));
        assert!(matches!(
            "OpenTelemetryLogs=yes".parse::<FeatureGate>(),
            Err(Error::InvalidFeatureValue { .. })
        ));
        assert!(matches!(
            "Unknown=true".parse::<FeatureGate>(),
            Err(Error::UnknownFeature(_))
        ));
    }
}
