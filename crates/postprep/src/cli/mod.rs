//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the postprep binary.

mod commands;
mod edit;
mod publish;
mod show;

pub use commands::{Cli, Commands};

use postprep::{PostprepResult, ProjectFile};

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> PostprepResult<()> {
    let file = ProjectFile::new(&cli.project);

    match cli.command {
        Commands::List => show::list(&file.load_or_default()?),
        Commands::Show { post } => show::show(&file.load()?, post)?,
        Commands::Random { unposted, seed } => show::random(&file.load()?, unposted, seed),
        Commands::Publish { config } => publish::publish(&file, config.as_deref()).await?,
        Commands::Edit(command) => edit::run_edit(&file, command)?,
    }

    Ok(())
}
