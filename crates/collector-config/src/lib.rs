//! Collector configuration assembly, merging, and rendering.
//!
//! This crate models the configuration of an OpenTelemetry Collector as a
//! graph of named components wired together by pipelines, and turns it into
//! a reproducible YAML document.
//!
//! # Key Features
//!
//! - **Typed wiring**: pipelines reference components by [`ComponentId`]
//! - **Opaque settings**: component settings are untyped YAML trees
//! - **Additive overrides**: operator documents add or replace components
//!   and individual pipeline slots without dropping generated wiring
//! - **Stable output**: keys are sorted at every depth, so equal documents
//!   render byte-for-byte identically
//!
//! # Example
//!
//! ```rust,no_run
//! use collector_config::{Config, Pipeline, Value, merge};
//!
//! # fn main() -> collector_config::Result<()> {
//! let overrides: Option<Value> = None;
//!
//! let mut config = Config::new(overrides.as_ref())?;
//! config.add_receiver("filelog/app", Value::Null);
//! config.add_pipeline("logs/app", Pipeline {
//!     receivers: vec!["filelog/app".into()],
//!     exporters: vec!["debug".into()],
//!     ..Pipeline::default()
//! });
//!
//! let config = merge(config, overrides.as_ref())?;
//! config.validate()?;
//! println!("{}", config.to_yaml()?);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod merge;
mod render;
mod types;

pub use config::{
    COMPACTING_PROCESSOR,
    Config,
    DEBUG_EXPORTER,
    LOGS_BATCH_PROCESSOR,
    ONE_SECOND_BATCH_PROCESSOR,
    RESOURCE_DETECTION_PROCESSOR,
    SUB_SECOND_BATCH_PROCESSOR,
    mapping,
};

pub use error::{ConfigError, Result};

pub use merge::merge;

pub use render::{GENERATED_HEADER, render};

pub use types::{ComponentId, Pipeline, Section};

// Re-export so callers can build settings without a direct dependency
pub use serde_yaml::{Mapping, Value};
