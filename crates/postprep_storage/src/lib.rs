//! Filesystem side of postprep.
//!
//! - [`ProjectFile`] loads and saves the JSON project file, writing through a
//!   temporary file and a rename so a crash never leaves half a project.
//! - [`ArchiveDir`] moves published media files out of the working set.
//! - [`scan_media_files`] and [`import_directory`] turn a folder of images and
//!   videos into new posts.
//!
//! All operations are blocking; the project file is assumed to be owned by a
//! single process for the duration of a session.
//!
//! # Example
//!
//! ```no_run
//! use postprep_core::Post;
//! use postprep_storage::ProjectFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = ProjectFile::new("projectDataStruct.json");
//! let mut project = file.load_or_default()?;
//! project.push(Post::from_file("shots/harbor.jpg"));
//! file.save(&project)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
mod import;
mod project_file;

pub use archive::{ArchiveDir, DEFAULT_ARCHIVE_DIR};
pub use import::{import_directory, scan_media_files};
pub use project_file::{DEFAULT_PROJECT_FILE, ProjectFile};
pub use postprep_error::{StorageError, StorageErrorKind};
