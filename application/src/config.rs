//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use common::pagination;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Catalog API configuration.
    #[serde(default)]
    pub api: Api,

    /// Catalog configuration.
    #[serde(default)]
    pub catalog: Catalog,

    /// Session storage configuration.
    #[serde(default)]
    pub storage: Storage,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("CONF")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Catalog API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the catalog server.
    #[default("http://localhost:3000".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Api> for service::infra::transport::reqwest::Config {
    fn from(value: Api) -> Self {
        let Api { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Catalog configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Catalog {
    /// Number of products requested per page.
    #[default(service::Config::DEFAULT_PAGE_SIZE.get())]
    pub page_size: u32,
}

impl TryFrom<Catalog> for service::Config {
    type Error = &'static str;

    fn try_from(value: Catalog) -> Result<Self, Self::Error> {
        let Catalog { page_size } = value;
        Ok(Self {
            page_size: pagination::Size::try_from(page_size)?,
        })
    }
}

/// Session storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory the session is persisted into.
    #[default(PathBuf::from(".catalog"))]
    pub path: PathBuf,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{io::Write as _, time};

    use super::{Catalog, Config};

    #[test]
    fn defaults_without_sources() {
        let conf = Config::new("/nonexistent/catalog-config").unwrap();

        assert_eq!(conf.api.base_url, "http://localhost:3000");
        assert_eq!(conf.api.timeout, time::Duration::from_secs(30));
        assert_eq!(conf.catalog.page_size, 8);
        assert_eq!(conf.storage.path.to_str(), Some(".catalog"));
        assert_eq!(tracing::Level::from(conf.log.level), tracing::Level::INFO);
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [api]
            base_url = "https://catalog.example.com"
            timeout = "5s"

            [catalog]
            page_size = 20

            [log]
            level = "DEBUG"
            "#,
        )
        .unwrap();

        let conf = Config::new(file.path().to_str().unwrap()).unwrap();

        assert_eq!(conf.api.base_url, "https://catalog.example.com");
        assert_eq!(conf.api.timeout, time::Duration::from_secs(5));
        assert_eq!(conf.catalog.page_size, 20);
        assert_eq!(
            tracing::Level::from(conf.log.level),
            tracing::Level::DEBUG,
        );
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(service::Config::try_from(Catalog { page_size: 0 }).is_err());
        assert_eq!(
            service::Config::try_from(Catalog { page_size: 3 })
                .unwrap()
                .page_size
                .get(),
            3,
        );
    }
}
