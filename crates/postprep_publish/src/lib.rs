//! Instagram Graph API publisher for postprep projects.
//!
//! [`Publisher`] walks a project in order and, for every post not yet marked
//! as posted, creates the media container(s), publishes them, marks the post,
//! saves the project file and moves the local media into the archive folder.
//!
//! The HTTP transport sits behind the [`GraphApi`] trait; [`GraphClient`] is
//! the reqwest implementation.
//!
//! # Example
//!
//! ```no_run
//! use postprep_publish::{Credentials, PublishSettings, Publisher};
//! use postprep_storage::ProjectFile;
//!
//! # async fn run() -> postprep_error::PostprepResult<()> {
//! let settings = PublishSettings::load()?;
//! let credentials = Credentials::from_env()?;
//! let file = ProjectFile::default();
//! let mut project = file.load()?;
//!
//! let publisher = Publisher::from_settings(&settings, credentials, file)?;
//! let report = publisher.run(&mut project).await;
//! println!("{} published", report.published().len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod client;
mod config;
mod publisher;

pub use api::{ContainerId, ContainerRequest, GraphApi, GraphResponse, PublishedId};
pub use client::GraphClient;
pub use config::{
    ACCESS_TOKEN_VAR, ACCOUNT_ID_VAR, Credentials, PublishSettings, PublishSettingsBuilder,
    PublishSettingsBuilderError,
};
pub use publisher::{FailedPost, PublishReport, PublishedPost, Publisher};
