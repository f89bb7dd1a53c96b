//! postprep CLI binary.
//!
//! Loads a project file, applies one command and saves the result:
//! - Create, reorder, merge and delete posts and media
//! - Edit captions, media fields and post metadata
//! - Publish unposted posts to Instagram

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let logging = postprep::LoggingConfig::from_verbosity(cli.verbose).with_json_logs(cli.json_logs);
    postprep::init_logging(&logging)?;

    cli::run(cli).await?;

    Ok(())
}
