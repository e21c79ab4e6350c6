mod cli;
mod commands;
mod error;
mod logging;
mod mcp;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Delete {
            path,
            pages,
            output,
        } => {
            report(
                "delete",
                commands::delete::run(&path, &pages, output.as_deref()),
            )?;
        }
        Commands::Merge { inputs, output } => {
            report("merge", commands::merge::run(&inputs, output.as_deref()))?;
        }
        Commands::Insert {
            base,
            injected,
            position,
            output,
        } => {
            report(
                "insert",
                commands::insert::run(&base, &injected, &position, output.as_deref()),
            )?;
        }
    }

    Ok(())
}
