//! Default log pipelines for the collector sidecar.
//!
//! Each supported process gets a builder that adds a storage extension, a
//! file receiver, resource and transform processors, and a `logs/<source>`
//! pipeline to a [`collector_config::Config`]:
//!
//! | Source       | Pipelines                         | Prerequisite                 |
//! |--------------|-----------------------------------|------------------------------|
//! | Patroni      | `logs/patroni`                    | none                         |
//! | pgAdmin      | `logs/pgadmin`, `logs/gunicorn`   | none                         |
//! | pgBackRest   | `logs/pgbackrest`                 | a repository with a volume   |
//!
//! Every builder is a no-op unless [`feature::OPEN_TELEMETRY_LOGS`] is
//! enabled. [`generate`] runs the builders, folds in the operator's override,
//! checks the wiring, and renders the document.
//!
//! # Example
//!
//! ```rust,no_run
//! use collector_logs::{FeatureGate, LogSource, generate};
//!
//! let gate: FeatureGate = "OpenTelemetryLogs=true".parse()?;
//! let text = generate(&gate, None, &[LogSource::Patroni])?;
//! # Ok::<(), collector_logs::Error>(())
//! ```

mod components;
mod error;
pub mod feature;
mod generate;
mod instrumentation;
pub mod naming;
mod patroni;
mod pgadmin;
mod pgbackrest;
pub mod transforms;

pub use error::{Error, Result};

pub use feature::FeatureGate;

pub use generate::{CONFIG_MAP_KEY, LogSource, generate, write_config_map};

pub use instrumentation::{BackupRepo, InstrumentationLogsSpec, InstrumentationSpec, RepoVolume};

pub use patroni::enable_patroni_logging;
pub use pgadmin::enable_pgadmin_logging;
pub use pgbackrest::{LINE_START_PATTERN, enable_pgbackrest_logging};
