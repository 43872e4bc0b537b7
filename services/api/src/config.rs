//! Service configuration.
//!
//! Settings come from a YAML file picked by `APP_ENV`, then
//! `TRELLIS__`-prefixed environment variables (`TRELLIS__DATABASE__HOST`,
//! `TRELLIS__HTTP_SERVER__PORT`, ...), then `DATABASE_URL`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::db::DbConfig;

/// Deployment environment, selected with `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Test,
    E2e,
    Production,
}

impl AppEnv {
    /// Reads `APP_ENV`, defaulting to development when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("APP_ENV") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Config file for this environment. Production is configured purely
    /// through the environment.
    pub fn config_file(self) -> Option<&'static str> {
        match self {
            AppEnv::Development => Some("config.yml"),
            AppEnv::Test => Some("config.test.yml"),
            AppEnv::E2e => Some("config.e2e.yml"),
            AppEnv::Production => None,
        }
    }
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "dev" | "development" => Ok(AppEnv::Development),
            "test" => Ok(AppEnv::Test),
            "e2e" => Ok(AppEnv::E2e),
            "prod" | "production" => Ok(AppEnv::Production),
            other => anyhow::bail!("unknown APP_ENV '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.user, self.password, self.host, self.port, self.name, self.ssl
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerSettings {
    pub host: String,
    pub port: u16,
}

/// Raw settings as they appear in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub http_server: HttpServerSettings,
    pub log_level: String,
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub run_migrations: bool,
    pub database: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(AppEnv::from_env()?)
    }

    pub fn load(app_env: AppEnv) -> Result<Self> {
        let settings = load_settings(app_env)?;

        let listen_addr = format!("{}:{}", settings.http_server.host, settings.http_server.port)
            .parse()
            .context("invalid http_server address")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| settings.database.connection_url());

        let database = DbConfig {
            database_url,
            max_connections: settings.database.max_connections,
            min_connections: settings.database.min_connections,
            ..Default::default()
        };

        Ok(Self {
            app_env,
            listen_addr,
            log_level: settings.log_level,
            run_migrations: settings.run_migrations,
            database,
        })
    }
}

/// Layers defaults, the environment's config file, and env overrides.
pub fn load_settings(app_env: AppEnv) -> Result<Settings> {
    let mut builder = config::Config::builder()
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.user", "trellis")?
        .set_default("database.password", "")?
        .set_default("database.name", "trellis")?
        .set_default("database.ssl", "disable")?
        .set_default("database.max_connections", 10)?
        .set_default("database.min_connections", 1)?
        .set_default("http_server.host", "0.0.0.0")?
        .set_default("http_server.port", 8080)?
        .set_default("log_level", "info")?
        .set_default("run_migrations", false)?;

    if let Some(file_name) = app_env.config_file() {
        let path = find_config_file(file_name)?;
        debug!(path = %path.display(), "Loading config file");
        builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Yaml));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix("TRELLIS")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("could not read configuration")?
        .try_deserialize()
        .context("could not unmarshal configuration")?;

    Ok(settings)
}

fn find_config_file(file_name: &str) -> Result<PathBuf> {
    let candidates = [
        PathBuf::from("./config"),
        PathBuf::from("services/api/config"),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config"),
    ];

    candidates
        .iter()
        .map(|dir| dir.join(file_name))
        .find(|path| path.is_file())
        .with_context(|| {
            let tried = candidates
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("config file {file_name} not found; tried {tried}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("development", AppEnv::Development)]
    #[case("dev", AppEnv::Development)]
    #[case("TEST", AppEnv::Test)]
    #[case("e2e", AppEnv::E2e)]
    #[case("production", AppEnv::Production)]
    fn test_app_env_parse(#[case] input: &str, #[case] expected: AppEnv) {
        assert_eq!(input.parse::<AppEnv>().unwrap(), expected);
    }

    #[test]
    fn test_app_env_rejects_unknown() {
        assert!("staging".parse::<AppEnv>().is_err());
    }

    #[test]
    fn test_production_reads_no_file() {
        assert_eq!(AppEnv::Production.config_file(), None);
        assert_eq!(AppEnv::Test.config_file(), Some("config.test.yml"));
    }

    #[test]
    fn test_connection_url() {
        let settings = DatabaseSettings {
            host: "db".to_string(),
            port: 5433,
            user: "app".to_string(),
            password: "pw".to_string(),
            name: "trellis_test".to_string(),
            ssl: "disable".to_string(),
            max_connections: 10,
            min_connections: 1,
        };
        assert_eq!(
            settings.connection_url(),
            "postgres://app:pw@db:5433/trellis_test?sslmode=disable"
        );
    }

    #[test]
    fn test_load_test_settings_from_file() {
        let settings = load_settings(AppEnv::Test).unwrap();
        assert_eq!(settings.database.name, "trellis_test");
        assert_eq!(settings.http_server.port, 8081);
        assert!(settings.run_migrations);
    }
}
