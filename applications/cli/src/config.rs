/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "kyofu.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `file` must exist when given; otherwise `./kyofu.toml` is read if
    /// present. `KYOFU_*` environment variables override the file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, None)
    }

    /// Same as [`CliConfig::load`] with an explicit environment map
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match file {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with KYOFU_)
        settings = settings.add_source(
            config::Environment::with_prefix("KYOFU")
                .try_parsing(true)
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Apply a command-line database URL, if given
    #[must_use]
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "Database URL is required (set KYOFU_DATABASE_URL)".to_string(),
            ));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(CliError::Config(format!(
                "Only sqlite database URLs are supported: {}",
                self.database_url
            )));
        }

        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://./kyofu.db".to_string()
}

fn default_log_filter() -> String {
    "kyofu=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            log_filter: default_log_filter(),
        }
    }
}
