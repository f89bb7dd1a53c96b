//! Post and media data model for postprep.
//!
//! A [`Project`] is an ordered list of [`Post`]s, each carrying an ordered
//! list of [`Media`]. Every editing operation is an explicit command on these
//! types: reorder and delete media, merge one post into another, edit fields,
//! and pick a random post. The currently selected media item is passed in as
//! an explicit `Option<usize>` and the adjusted selection is returned.
//!
//! # Example
//!
//! ```
//! use postprep_core::{Post, Project};
//!
//! let mut project = Project::default();
//! project.push(Post::from_file("shots/a.jpg"));
//! project.push(Post::from_file("shots/b.mp4"));
//!
//! // Fold the second post's media into the first one.
//! let current = project.merge_left(1, None);
//! assert_eq!(current, Some(0));
//! assert_eq!(project.len(), 1);
//! assert_eq!(project.posts()[0].media().len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod post;
mod project;
mod serde_helpers;
pub mod timestamp;

pub use media::{Location, Media, MediaField, MediaType, SUPPORTED_EXTENSIONS, UserTag};
pub use post::{LocalData, Post, PostKind, PostMetaField, PostOptions};
pub use project::Project;
pub use serde_helpers::split_keywords;
