//! Pre-authored transform statements for each log source.
//!
//! The statements live in `transforms/*.yaml` and are embedded with
//! `include_str!()`, then parsed once on first use. They are never mutated,
//! so every generation shares the same parsed copy.

use collector_config::Value;
use once_cell::sync::Lazy;

fn embedded(name: &str, yaml: &str) -> Value {
    serde_yaml::from_str(yaml)
        .unwrap_or_else(|err| panic!("Invalid embedded transforms {name}: {err} - this is a bug"))
}

/// `log_statements` for Patroni's JSON logs.
pub static PATRONI_LOGS_TRANSFORMS: Lazy<Value> = Lazy::new(|| {
    embedded(
        "patroni_logs.yaml",
        include_str!("../transforms/patroni_logs.yaml"),
    )
});

/// `log_statements` for pgAdmin and gunicorn JSON logs.
pub static PGADMIN_LOGS_TRANSFORMS: Lazy<Value> = Lazy::new(|| {
    embedded(
        "pgadmin_logs.yaml",
        include_str!("../transforms/pgadmin_logs.yaml"),
    )
});

/// `log_statements` for pgBackRest's prefixed text logs.
pub static PGBACKREST_LOGS_TRANSFORMS: Lazy<Value> = Lazy::new(|| {
    embedded(
        "pgbackrest_logs.yaml",
        include_str!("../transforms/pgbackrest_logs.yaml"),
    )
});
