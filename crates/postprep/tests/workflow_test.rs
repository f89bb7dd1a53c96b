//! End-to-end workflow through the facade: import, edit, publish.

use async_trait::async_trait;
use postprep::{
    ArchiveDir, ContainerId, ContainerRequest, GraphApi, GraphResponse, MediaField,
    PostMetaField, PostprepResult, ProjectFile, Publisher, import_directory,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Graph API stand-in that accepts everything.
#[derive(Default)]
struct AcceptingApi {
    calls: AtomicUsize,
}

#[async_trait]
impl GraphApi for AcceptingApi {
    async fn create_container(&self, _request: &ContainerRequest) -> PostprepResult<GraphResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GraphResponse::with_id(format!("container-{}", n)))
    }

    async fn publish_container(&self, _creation_id: &ContainerId) -> PostprepResult<GraphResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GraphResponse::with_id(format!("media-{}", n)))
    }
}

#[tokio::test]
async fn test_import_merge_and_publish() {
    let dir = TempDir::new().unwrap();
    let shots = dir.path().join("shots");
    std::fs::create_dir(&shots).unwrap();
    for name in ["01.jpg", "02.jpg", "03.mp4"] {
        std::fs::write(shots.join(name), name.as_bytes()).unwrap();
    }

    let file = ProjectFile::new(dir.path().join("projectDataStruct.json"));
    let mut project = file.load_or_default().unwrap();
    assert_eq!(import_directory(&mut project, &shots).unwrap(), Some(0));

    // Fold the second image into the first post as a carousel.
    assert_eq!(project.merge_left(1, None), Some(0));
    project.update_post_meta(Some(0), PostMetaField::Kind("carousel".to_string().into()));
    for index in 0..2 {
        let url = format!("https://cdn.example/{}.jpg", index);
        assert!(project.update_media_field(Some(0), index, MediaField::Url(Some(url))));
    }
    project.set_caption(Some(0), "Harbor at dusk");
    file.save(&project).unwrap();

    let mut project = file.load().unwrap();
    assert_eq!(project.len(), 2);

    let api = AcceptingApi::default();
    let publisher = Publisher::new(api, file.clone(), ArchiveDir::new(dir.path().join("posted")));
    let report = publisher.run(&mut project).await;

    // The video post has no URL and stays unpublished.
    assert_eq!(report.published().len(), 1);
    assert_eq!(report.failed().len(), 1);

    let saved = file.load().unwrap();
    assert!(saved.posts()[0].is_posted());
    assert!(!saved.posts()[1].is_posted());

    let archived = dir.path().join("posted");
    assert!(archived.join("01.jpg").exists());
    assert!(archived.join("02.jpg").exists());
    assert!(shots.join("03.mp4").exists());
}
