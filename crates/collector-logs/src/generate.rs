//! One full generation cycle, from inputs to rendered text.

use crate::error::Result;
use crate::feature::FeatureGate;
use crate::instrumentation::{BackupRepo, InstrumentationSpec};
use crate::patroni::enable_patroni_logging;
use crate::pgadmin::enable_pgadmin_logging;
use crate::pgbackrest::enable_pgbackrest_logging;
use collector_config::{Config, merge};
use std::collections::BTreeMap;

/// Key of the rendered document in the collector's config map.
pub const CONFIG_MAP_KEY: &str = "collector.yaml";

/// A process whose logs the collector can forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Patroni,
    PgAdmin,
    PgBackRest { repos: Vec<BackupRepo> },
}

/// Build, merge, validate, and render a collector configuration.
///
/// The override in `spec` seeds the document, every source adds its
/// defaults, and the override is applied again last so that operator
/// settings win while generated wiring stays in place.
///
/// # Errors
///
/// Fails when the override is malformed or a pipeline ends up naming a
/// component that is not defined. No partial document is returned.
pub fn generate(
    gate: &FeatureGate,
    spec: Option<&InstrumentationSpec>,
    sources: &[LogSource],
) -> Result<String> {
    let overrides = spec.and_then(InstrumentationSpec::overrides);
    let mut config = Config::new(overrides)?;

    for source in sources {
        match source {
            LogSource::Patroni => enable_patroni_logging(gate, spec, &mut config),
            LogSource::PgAdmin => enable_pgadmin_logging(gate, spec, &mut config),
            LogSource::PgBackRest { repos } => {
                enable_pgbackrest_logging(gate, spec, repos, &mut config)
            }
        }
    }

    let config = merge(config, overrides)?;
    config.validate()?;
    Ok(config.to_yaml()?)
}

/// Generate and store the document under [`CONFIG_MAP_KEY`] in `data`.
///
/// `data` is left untouched when generation fails.
pub fn write_config_map(
    data: &mut BTreeMap<String, String>,
    gate: &FeatureGate,
    spec: Option<&InstrumentationSpec>,
    sources: &[LogSource],
) -> Result<()> {
    let rendered = generate(gate, spec, sources)?;
    data.insert(CONFIG_MAP_KEY.to_string(), rendered);
    Ok(())
}
