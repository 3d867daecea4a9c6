//! Container names and log locations of each log source.

/// Container running Postgres and Patroni.
pub const DATABASE_CONTAINER: &str = "database";

/// Directory Patroni writes its JSON logs to.
pub const PATRONI_LOG_DIRECTORY: &str = "/pgdata/patroni/log";

/// Container running pgAdmin and gunicorn.
pub const PGADMIN_CONTAINER: &str = "pgadmin";

/// Directory pgAdmin and gunicorn write their logs to.
pub const PGADMIN_LOG_DIRECTORY: &str = "/var/lib/pgadmin/logs";

pub const PGADMIN_LOG_FILE: &str = "/var/lib/pgadmin/logs/pgadmin.log";

pub const GUNICORN_LOG_FILE: &str = "/var/lib/pgadmin/logs/gunicorn.log";

/// Container running pgBackRest on a dedicated repository host.
pub const PGBACKREST_CONTAINER: &str = "pgbackrest";

/// Log directory of a pgBackRest repository volume.
pub fn pgbackrest_repo_log_directory(repo_name: &str) -> String {
    format!("/pgbackrest/{repo_name}/log")
}

/// Subdirectory where the collector records its reading progress.
///
/// It sits inside the log directory so both share a failure domain.
pub fn receiver_storage_directory(log_directory: &str) -> String {
    format!("{log_directory}/receiver")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pgbackrest_repo_log_directory() {
        assert_eq!(pgbackrest_repo_log_directory("repo1"), "/pgbackrest/repo1/log");
    }

    #[test]
    fn test_receiver_storage_directory() {
        assert_eq!(
            receiver_storage_directory(PATRONI_LOG_DIRECTORY),
            "/pgdata/patroni/log/receiver"
        );
    }

    #[test]
    fn test_pgadmin_files_live_in_log_directory() {
        for file in [PGADMIN_LOG_FILE, GUNICORN_LOG_FILE] {
            assert!(file.starts_with(PGADMIN_LOG_DIRECTORY));
        }
    }
}
