//! Compare command
//!
//! Usage: zeekdiff compare <CATEGORY> <CLUSTER_LOG> <OFFLINE_LOG> [--strict | --common-fields]
//!   [--limit N] [--full-rows] [--format text|json]

use crate::commands::{print_json, CommandResult, CompareFlags, OutputFormat, Status};
use clap::Args;
use std::path::PathBuf;
use zeekdiff_core::render_text;
use zeekdiff_engine::commands::CompareOptions;
use zeekdiff_engine::{compare_with, CategoryOutcome};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Category name, e.g. ssl
    pub category: String,

    /// Log written by the cluster
    pub cluster_log: PathBuf,

    /// Log written by the offline reference run
    pub offline_log: PathBuf,

    #[command(flatten)]
    pub flags: CompareFlags,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> CommandResult {
    let config = args.flags.load()?;
    let outcome = compare_with(
        &args.category,
        &args.cluster_log,
        &args.offline_log,
        &config.categories,
        &CompareOptions::from_config(&config),
    );

    match args.flags.format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => match &outcome {
            CategoryOutcome::Compared(summary) => print!("{}", render_text(summary)),
            CategoryOutcome::Skipped(skip) => {
                println!(
                    "Skipped category {} [{}]: {}",
                    skip.category, skip.code, skip.reason
                );
            }
        },
    }

    Ok(Status::from_clean(outcome.is_identical()))
}
