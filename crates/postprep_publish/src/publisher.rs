//! Publish protocol and batch driver.

use crate::{
    ContainerId, ContainerRequest, Credentials, GraphApi, GraphClient, PublishSettings,
    PublishedId,
};
use derive_getters::Getters;
use postprep_core::{Media, Post, PostKind, Project};
use postprep_error::{PostprepResult, PublishError, PublishErrorKind};
use postprep_storage::{ArchiveDir, ProjectFile};
use tracing::{debug, info, instrument, warn};

/// A post that went live.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PublishedPost {
    /// Position in the project.
    index: usize,
    /// Id of the published media object.
    media_id: PublishedId,
}

/// A post that could not be published.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FailedPost {
    /// Position in the project.
    index: usize,
    /// Why it failed.
    reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct PublishReport {
    /// Posts published by this run.
    published: Vec<PublishedPost>,
    /// Posts already marked as posted.
    skipped: Vec<usize>,
    /// Posts that stayed unpublished.
    failed: Vec<FailedPost>,
}

impl PublishReport {
    /// True when no post failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives the Graph API publish protocol for the posts of a project.
///
/// Each API call is awaited before the next is issued, and a post finishes
/// before the next one starts.
#[derive(Debug)]
pub struct Publisher<A> {
    api: A,
    project_file: ProjectFile,
    archive: ArchiveDir,
}

impl Publisher<GraphClient> {
    /// Publisher talking to the real Graph API.
    pub fn from_settings(
        settings: &PublishSettings,
        credentials: Credentials,
        project_file: ProjectFile,
    ) -> PostprepResult<Self> {
        let api = GraphClient::new(settings, credentials)?;
        Ok(Self::new(
            api,
            project_file,
            ArchiveDir::new(settings.archive_dir().clone()),
        ))
    }
}

impl<A: GraphApi> Publisher<A> {
    /// Create a publisher that saves to `project_file` and archives into `archive`.
    pub fn new(api: A, project_file: ProjectFile, archive: ArchiveDir) -> Self {
        Self {
            api,
            project_file,
            archive,
        }
    }

    /// Create a container for one media item.
    ///
    /// Items without a public URL or of an unknown type are skipped. Any
    /// failure is logged and yields `None`.
    #[instrument(skip(self, media), fields(file = ?media.file_path(), media_type = %media.media_type()))]
    pub async fn create_media_container(&self, media: &Media) -> Option<ContainerId> {
        let Some(request) = ContainerRequest::for_media(media) else {
            if media.public_url().is_none() {
                warn!("Skipping media without public URL");
            } else {
                warn!("Skipping media of unsupported type");
            }
            return None;
        };

        match self.api.create_container(&request).await {
            Ok(response) => match response.usable_id() {
                Some(id) => {
                    debug!(container_id = id, "Created media container");
                    Some(ContainerId(id.to_string()))
                }
                None => {
                    warn!(reason = %response.describe_failure(), "Media container rejected");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Media container request failed");
                None
            }
        }
    }

    /// Create one child container per media item, then the carousel parent.
    ///
    /// # Errors
    ///
    /// Fails with [`PublishErrorKind::NoValidChildren`] when no child was
    /// created, without contacting the parent endpoint.
    #[instrument(skip(self, post), fields(media_count = post.media().len()))]
    pub async fn create_carousel(&self, post: &Post) -> PostprepResult<ContainerId> {
        let mut children = Vec::new();
        for media in post.media() {
            if let Some(child) = self.create_media_container(media).await {
                children.push(child);
            }
        }

        if children.is_empty() {
            return Err(PublishError::new(PublishErrorKind::NoValidChildren).into());
        }
        debug!(children = children.len(), "Creating carousel container");

        let response = self
            .api
            .create_container(&ContainerRequest::carousel(children, post.caption()))
            .await?;
        response
            .usable_id()
            .map(|id| ContainerId(id.to_string()))
            .ok_or_else(|| {
                PublishError::new(PublishErrorKind::NoContainer(response.describe_failure()))
                    .into()
            })
    }

    /// Create the container that will be published for `post`.
    pub async fn create_post_container(&self, post: &Post) -> PostprepResult<ContainerId> {
        match post.post_kind() {
            PostKind::Carousel => self.create_carousel(post).await,
            PostKind::Single => {
                let first = post
                    .media()
                    .first()
                    .ok_or_else(|| PublishError::new(PublishErrorKind::NoMedia))?;
                self.create_media_container(first).await.ok_or_else(|| {
                    PublishError::new(PublishErrorKind::NoContainer(
                        "media container was not created".to_string(),
                    ))
                    .into()
                })
            }
            PostKind::Other(kind) => {
                Err(PublishError::new(PublishErrorKind::UnsupportedPostKind(kind.clone())).into())
            }
        }
    }

    /// Publish a ready container.
    #[instrument(skip(self, creation_id), fields(creation_id = %creation_id))]
    pub async fn publish_container(&self, creation_id: &ContainerId) -> PostprepResult<PublishedId> {
        let response = self.api.publish_container(creation_id).await?;
        response
            .usable_id()
            .map(|id| PublishedId(id.to_string()))
            .ok_or_else(|| {
                PublishError::new(PublishErrorKind::PublishRejected(response.describe_failure()))
                    .into()
            })
    }

    /// Run the whole protocol for one post.
    pub async fn publish_post(&self, post: &Post) -> PostprepResult<PublishedId> {
        let creation_id = self.create_post_container(post).await?;
        self.publish_container(&creation_id).await
    }

    /// Publish every unposted post of `project` in order.
    ///
    /// After each success the post is marked as posted, the project is saved
    /// and the post's local files are archived. A failing post never stops
    /// the batch.
    #[instrument(skip(self, project), fields(posts = project.len(), path = %self.project_file.path().display()))]
    pub async fn run(&self, project: &mut Project) -> PublishReport {
        let mut report = PublishReport::default();

        for index in 0..project.len() {
            let Some(post) = project.post(index).cloned() else {
                continue;
            };
            let name = post.display_name(index);

            if post.is_posted() {
                debug!(post = %name, "Already posted, skipping");
                report.skipped.push(index);
                continue;
            }

            info!(post = %name, kind = %post.post_kind(), "Publishing post");
            match self.publish_post(&post).await {
                Ok(media_id) => {
                    info!(post = %name, media_id = %media_id, "Post published");
                    self.record_success(project, index, &post);
                    report.published.push(PublishedPost { index, media_id });
                }
                Err(e) => {
                    warn!(post = %name, error = %e, "Failed to publish post");
                    report.failed.push(FailedPost {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            published = report.published.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Publish run finished"
        );
        report
    }

    fn record_success(&self, project: &mut Project, index: usize, post: &Post) {
        if let Some(stored) = project.post_mut(index) {
            stored.mark_posted();
        }
        if let Err(e) = self.project_file.save(project) {
            warn!(error = %e, "Failed to save project after publishing");
        }
        let moved = self.archive.archive_media(post.media());
        debug!(archived = moved.len(), "Archived published media");
    }
}
