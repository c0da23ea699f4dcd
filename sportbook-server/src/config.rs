//! Runtime configuration
//!
//! Loaded once at startup and passed explicitly to the connection provider.
//!
//! ```toml
//! [database]
//! host = "localhost"
//! port = 5432
//! user = "sportbook"
//! password = "secret"
//! database = "sportbook"
//!
//! [test_database]
//! database = "sportbook_test"
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 3030
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("testing mode requires a test database, but '{database}' has no 'test' marker")]
    NotATestDatabase { database: String },
}

/// Database connection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "sportbook".to_string(),
        }
    }
}

impl DbConfig {
    /// Override fields from `{prefix}_HOST`, `_PORT`, `_USER`, `_PASSWORD`, `_NAME`.
    pub fn apply_env(&mut self, prefix: &str) -> Result<(), ConfigError> {
        if let Ok(host) = env::var(format!("{prefix}_HOST")) {
            self.host = host;
        }
        if let Ok(port) = env::var(format!("{prefix}_PORT")) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "database port",
                value: port,
            })?;
        }
        if let Ok(user) = env::var(format!("{prefix}_USER")) {
            self.user = user;
        }
        if let Ok(password) = env::var(format!("{prefix}_PASSWORD")) {
            self.password = password;
        }
        if let Ok(name) = env::var(format!("{prefix}_NAME")) {
            self.database = name;
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    pub cors_permissive: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3030,
            cors_permissive: false,
        }
    }
}

/// Which database a process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Production,
    Testing,
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub test_database: Option<DbConfig>,
    #[serde(default)]
    pub server: ServerSettings,
}

impl Settings {
    /// Default config path: ~/.sportbook/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sportbook/config.toml")
    }

    /// Load settings from a TOML file, then apply `SPORTBOOK_DB_*` overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut settings = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        settings.database.apply_env("SPORTBOOK_DB")?;
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Database parameters for the given mode.
    ///
    /// Testing mode falls back to `[database]` when no `[test_database]`
    /// section exists; the connection provider then rejects it unless its
    /// name carries the test marker.
    pub fn database_for(&self, mode: Mode) -> &DbConfig {
        match mode {
            Mode::Production => &self.database,
            Mode::Testing => self.test_database.as_ref().unwrap_or(&self.database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_sections_with_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [database]
            user = "booker"
            database = "sportbook"

            [test_database]
            database = "sportbook_test"

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(settings.database.user, "booker");
        assert_eq!(settings.database.host, "localhost");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(
            settings.database_for(Mode::Testing).database,
            "sportbook_test"
        );
        assert_eq!(settings.database_for(Mode::Production).database, "sportbook");
    }

    #[test]
    fn testing_falls_back_to_main_database() {
        let settings = Settings::default();
        assert_eq!(settings.database_for(Mode::Testing).database, "sportbook");
    }

    #[test]
    fn rejects_invalid_toml() {
        let err = Settings::from_toml_str("[database\nhost = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ncors_permissive = true").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.server.cors_permissive);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.server, ServerSettings::default());
    }
}
