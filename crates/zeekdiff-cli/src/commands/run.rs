//! Run command
//!
//! Usage: zeekdiff run [--cluster-dir <DIR>] [--offline-dir <DIR>] [--parallel]
//!   [--strict | --common-fields] [--limit N] [--full-rows] [--format text|json]

use crate::commands::{print_json, CommandResult, CompareFlags, OutputFormat, Status};
use clap::Args;
use std::path::PathBuf;
use zeekdiff_engine::{render_run_text, run, run_parallel};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory holding the cluster's logs (overrides config)
    #[arg(long, value_name = "DIR")]
    pub cluster_dir: Option<PathBuf>,

    /// Directory holding the offline logs (overrides config)
    #[arg(long, value_name = "DIR")]
    pub offline_dir: Option<PathBuf>,

    /// Compare categories concurrently
    #[arg(long)]
    pub parallel: bool,

    #[command(flatten)]
    pub flags: CompareFlags,
}

/// Execute run command
pub fn execute(args: RunArgs) -> CommandResult {
    let mut config = args.flags.load()?;
    if let Some(dir) = args.cluster_dir {
        config.cluster_log_dir = dir;
    }
    if let Some(dir) = args.offline_dir {
        config.offline_log_dir = dir;
    }

    let summary = if args.parallel {
        run_parallel(&config)
    } else {
        run(&config)
    };

    match args.flags.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => print!("{}", render_run_text(&summary)),
    }

    Ok(Status::from_clean(summary.is_clean()))
}
