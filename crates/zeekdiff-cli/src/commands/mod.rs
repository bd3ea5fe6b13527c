//! Subcommands and the arguments they share.

pub mod compare;
pub mod fields;
pub mod run;

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use zeekdiff_core::FieldStrategy;
use zeekdiff_engine::{ConfigError, EngineConfig};

pub type CommandResult = Result<Status, Box<dyn std::error::Error>>;

/// What a successful command found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything compared and identical
    Clean,
    /// Differences or skipped categories were reported
    Reported,
}

impl Status {
    pub fn code(self) -> i32 {
        match self {
            Status::Clean => 0,
            Status::Reported => 2,
        }
    }

    pub fn from_clean(clean: bool) -> Self {
        if clean {
            Status::Clean
        } else {
            Status::Reported
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        EngineConfig::load(self.config.as_deref())
    }
}

#[derive(Debug, Args)]
pub struct CompareFlags {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Require every key field to be present on both sides
    #[arg(long, conflicts_with = "common_fields")]
    pub strict: bool,

    /// Compare only on key fields present in both logs
    #[arg(long)]
    pub common_fields: bool,

    /// Maximum example rows per side
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Show the full source rows behind each example
    #[arg(long)]
    pub full_rows: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CompareFlags {
    /// Load the configuration and apply the command-line overrides.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = self.config.load()?;
        if self.strict {
            config.strategy = FieldStrategy::Strict;
        }
        if self.common_fields {
            config.strategy = FieldStrategy::Common;
        }
        if let Some(limit) = self.limit {
            config.report.sample_limit = limit;
        }
        if self.full_rows {
            config.report.full_rows = true;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
