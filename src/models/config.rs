use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration options for the promptsouq binary, read from the
/// environment once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Directory backup artifacts are written to and read from.
    pub backup_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
}

impl AppConfig {
    /// Read configuration from `DATABASE_URL` and `BACKUP_DIR` (defaulting
    /// to `backup/` next to the working directory).
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let backup_dir = env::var("BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("backup"));
        Ok(Self {
            database_url,
            backup_dir,
        })
    }
}
