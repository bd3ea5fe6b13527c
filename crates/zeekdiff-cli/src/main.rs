//! zeekdiff CLI
//!
//! Compares logs produced by a Zeek cluster against logs produced offline
//! from the same capture.

use clap::{Parser, Subcommand, ValueEnum};
use zeekdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "zeekdiff")]
#[command(about = "zeekdiff - Compare cluster and offline Zeek logs", long_about = None)]
struct Cli {
    /// Enable logging to stderr (default: quiet unless RUST_LOG is set)
    #[arg(long, global = true, value_enum)]
    log_profile: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Development,
    Production,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare one category from two log files
    Compare(commands::compare::CompareArgs),
    /// Compare every configured category from two log directories
    Run(commands::run::RunArgs),
    /// Print the effective key fields per category
    Fields(commands::fields::FieldsArgs),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match cli.log_profile {
        Some(LogProfile::Development) => init(Profile::Development),
        Some(LogProfile::Production) => init(Profile::Production),
        None if std::env::var_os("RUST_LOG").is_some() => init(Profile::Development),
        None => {}
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Run(args) => commands::run::execute(args),
        Commands::Fields(args) => commands::fields::execute(args),
    };

    match result {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
