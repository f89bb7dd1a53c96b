//! postprep: prepare social media posts and publish them to Instagram.
//!
//! A project is a JSON file holding an ordered list of posts. Each post is a
//! single image or video, or a carousel, with captions, alt text, user tags
//! and a location per media item. The `postprep` binary edits a project one
//! command at a time and publishes unposted posts through the Instagram Graph
//! API.
//!
//! # Architecture
//!
//! - `postprep_error` - Error types
//! - `postprep_core` - Post and media model, project store operations
//! - `postprep_storage` - Project file, media archive, directory import
//! - `postprep_publish` - Graph API client and publish batch driver
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;

pub use logging::{LoggingConfig, init_logging};

pub use postprep_error::{
    ConfigError, HttpError, JsonError, PostprepError, PostprepErrorKind, PostprepResult,
    PublishError, PublishErrorKind, StorageError, StorageErrorKind,
};

pub use postprep_core::{
    LocalData, Location, Media, MediaField, MediaType, Post, PostKind, PostMetaField,
    PostOptions, Project, SUPPORTED_EXTENSIONS, UserTag, split_keywords, timestamp,
};

pub use postprep_storage::{
    ArchiveDir, DEFAULT_ARCHIVE_DIR, DEFAULT_PROJECT_FILE, ProjectFile, import_directory,
    scan_media_files,
};

pub use postprep_publish::{
    ACCESS_TOKEN_VAR, ACCOUNT_ID_VAR, ContainerId, ContainerRequest, Credentials, FailedPost,
    GraphApi, GraphClient, GraphResponse, PublishReport, PublishSettings,
    PublishSettingsBuilder, PublishedId, PublishedPost, Publisher,
};
