//! Publish command handler.

use postprep::{Credentials, PostprepResult, ProjectFile, PublishSettings, Publisher};
use std::path::Path;
use tracing::instrument;

/// Publish every unposted post of the project in `file`.
///
/// Credentials are checked before the project is read or any request is made.
#[instrument(skip(file), fields(path = %file.path().display()))]
pub async fn publish(file: &ProjectFile, config: Option<&Path>) -> PostprepResult<()> {
    let credentials = Credentials::from_env()?;
    let settings = match config {
        Some(path) => PublishSettings::load_from(path)?,
        None => PublishSettings::load()?,
    };

    let mut project = file.load()?;
    let publisher = Publisher::from_settings(&settings, credentials, file.clone())?;
    let report = publisher.run(&mut project).await;

    println!(
        "Published {}, skipped {}, failed {}",
        report.published().len(),
        report.skipped().len(),
        report.failed().len()
    );
    for published in report.published() {
        println!(
            "  {}: media id {}",
            project
                .post(*published.index())
                .map(|post| post.display_name(*published.index()))
                .unwrap_or_default(),
            published.media_id()
        );
    }
    for failed in report.failed() {
        println!("  post {} failed: {}", failed.index(), failed.reason());
    }
    Ok(())
}
