use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Where image bytes come from.
///
/// Local mode serves files straight from the dataset directory; hosted mode
/// only stores per-image URLs pointing at an external bucket and never
/// touches image bytes itself.
#[derive(Debug, Clone)]
pub enum ImageSource {
    LocalDisk { dataset_path: PathBuf },
    HostedBucket { manifest_path: PathBuf, base_url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub image_source: ImageSource,
    /// Fixed sampling seed. Unset in production; set for reproducible draws.
    pub sample_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5001".to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidVar("BIND_ADDR", bind_addr.clone()))?;

        let mode = env::var("IMAGE_MODE").unwrap_or_else(|_| "local".to_string());
        let image_source = match mode.as_str() {
            "local" => ImageSource::LocalDisk {
                dataset_path: env::var("DATASET_PATH")
                    .map(PathBuf::from)
                    .map_err(|_| ConfigError::MissingVar("DATASET_PATH"))?,
            },
            "hosted" => ImageSource::HostedBucket {
                manifest_path: env::var("MANIFEST_PATH")
                    .map(PathBuf::from)
                    .map_err(|_| ConfigError::MissingVar("MANIFEST_PATH"))?,
                base_url: env::var("IMAGE_BASE_URL")
                    .map_err(|_| ConfigError::MissingVar("IMAGE_BASE_URL"))?,
            },
            other => return Err(ConfigError::InvalidVar("IMAGE_MODE", other.to_string())),
        };

        let sample_seed = match env::var("SAMPLE_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidVar("SAMPLE_SEED", raw.clone()))?,
            ),
            Err(_) => None,
        };

        Ok(AppConfig {
            database_url,
            bind_addr,
            image_source,
            sample_seed,
        })
    }

    /// Connect options shared by the server and the CLI binaries. Foreign
    /// keys and WAL are set here so every pooled connection gets them.
    pub fn connect_options(&self) -> sqlx::Result<SqliteConnectOptions> {
        Ok(SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal))
    }
}
