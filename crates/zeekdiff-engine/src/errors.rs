use thiserror::Error;
use zeekdiff_core::errors::{ExError, ExErrorKind};

/// Configuration loading and validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        let ex = ExError::new(ExErrorKind::InvalidConfig).with_op("load_config");
        match err {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => {
                ex.with_path(path).with_message(message)
            }
            ConfigError::Invalid { .. } => ex.with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_run_scoped() {
        let err: ExError = ConfigError::Parse {
            path: "zeekdiff.toml".to_string(),
            reason: "expected `=`".to_string(),
        }
        .into();
        assert_eq!(err.code(), "ERR_INVALID_CONFIG");
        assert_eq!(err.path(), Some("zeekdiff.toml"));
        assert!(!err.kind().is_category_scoped());
    }
}
