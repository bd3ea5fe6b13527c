//! Config loading from file and environment variables.

use super::model::EngineConfig;
use crate::errors::ConfigError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CLUSTER_LOG_DIR: &str = "ZEEKDIFF_CLUSTER_LOG_DIR";
pub const ENV_OFFLINE_LOG_DIR: &str = "ZEEKDIFF_OFFLINE_LOG_DIR";
pub const ENV_PCAP_PATH: &str = "ZEEKDIFF_PCAP_PATH";

impl EngineConfig {
    /// Load configuration from an optional file, apply environment
    /// overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: unreadable or unparsable file, invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading configuration");
                Self::from_file(path)?
            }
            None => {
                tracing::debug!("no config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file without validating it.
    ///
    /// # Errors
    ///
    /// `Read` if the file cannot be read, `Parse` if it is not valid TOML for
    /// this schema.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Parse configuration text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// `Parse` on malformed TOML, unknown enum values or missing required
    /// category keys.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Override directories and the pcap path from `lookup`.
    ///
    /// Unset and empty variables leave the current value alone.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        if let Some(dir) = var(ENV_CLUSTER_LOG_DIR) {
            self.cluster_log_dir = dir;
        }
        if let Some(dir) = var(ENV_OFFLINE_LOG_DIR) {
            self.offline_log_dir = dir;
        }
        if let Some(pcap) = var(ENV_PCAP_PATH) {
            self.pcap_path = Some(pcap);
        }
    }

    /// Check that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// `Invalid` naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster_log_dir.as_os_str().is_empty() {
            return Err(invalid("cluster_log_dir must not be empty"));
        }
        if self.offline_log_dir.as_os_str().is_empty() {
            return Err(invalid("offline_log_dir must not be empty"));
        }
        if self.report.sample_limit == 0 {
            return Err(invalid("report.sample_limit must be > 0"));
        }
        if self.categories.is_empty() {
            return Err(invalid("no categories configured"));
        }

        for (category, spec) in self.categories.iter() {
            if spec.log_file.trim().is_empty() {
                return Err(invalid(format!(
                    "categories.{category}.log_file must not be empty"
                )));
            }
            if spec.fields.is_empty() {
                return Err(invalid(format!(
                    "categories.{category}.fields must not be empty"
                )));
            }
            let mut seen = HashSet::new();
            for field in &spec.fields {
                if field.is_empty() {
                    return Err(invalid(format!(
                        "categories.{category}.fields contains an empty name"
                    )));
                }
                if !seen.insert(field.as_str()) {
                    return Err(invalid(format!(
                        "categories.{category}.fields lists {field} twice"
                    )));
                }
            }
            if let Some(field) = spec.orderings.keys().find(|f| !seen.contains(f.as_str())) {
                return Err(invalid(format!(
                    "categories.{category}.orderings names {field}, which is not a key field"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}
