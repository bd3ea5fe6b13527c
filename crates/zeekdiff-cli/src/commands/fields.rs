//! Fields command
//!
//! Usage: zeekdiff fields [--config <FILE>] [--format json]

use crate::commands::{print_json, CommandResult, ConfigArgs, OutputFormat, Status};
use clap::Args;

#[derive(Debug, Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute fields command
pub fn execute(args: FieldsArgs) -> CommandResult {
    let config = args.config.load()?;

    match args.format {
        OutputFormat::Json => print_json(&config.categories)?,
        OutputFormat::Text => {
            for (category, spec) in config.categories.iter() {
                println!("{} ({}): {}", category, spec.log_file, spec.fields.join(", "));
                for (field, kind) in &spec.orderings {
                    println!("  {} ordering: {}", field, kind.ordering().name());
                }
            }
        }
    }

    Ok(Status::Clean)
}
