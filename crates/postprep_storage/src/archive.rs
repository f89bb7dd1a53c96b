//! Relocation of published media files.

use postprep_core::Media;
use postprep_error::{PostprepResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Folder name used when none is configured.
pub const DEFAULT_ARCHIVE_DIR: &str = "posted";

/// Folder that receives the source files of published posts.
///
/// Files keep their base name; the folder is created on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDir {
    path: PathBuf,
}

impl ArchiveDir {
    /// Refer to an archive folder; nothing is created until a file is archived.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move `file` into the archive.
    ///
    /// Returns the new location, or `None` when `file` does not exist.
    #[tracing::instrument(skip(self, file), fields(file = %file.as_ref().display(), archive = %self.path.display()))]
    pub fn archive_file(&self, file: impl AsRef<Path>) -> PostprepResult<Option<PathBuf>> {
        let file = file.as_ref();
        if !file.is_file() {
            tracing::debug!("Source file not on disk, nothing to archive");
            return Ok(None);
        }

        let name = file.file_name().ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidPath(file.display().to_string()))
        })?;

        std::fs::create_dir_all(&self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let destination = self.path.join(name);
        std::fs::rename(file, &destination).map_err(|e| {
            StorageError::new(StorageErrorKind::FileMove(format!(
                "{} to {}: {}",
                file.display(),
                destination.display(),
                e
            )))
        })?;

        tracing::info!(destination = %destination.display(), "Archived media file");
        Ok(Some(destination))
    }

    /// Archive the local files of every media item, best effort.
    ///
    /// Failures are logged and skipped; the moved destinations are returned.
    pub fn archive_media(&self, media: &[Media]) -> Vec<PathBuf> {
        media
            .iter()
            .filter_map(|item| item.file_path().as_deref())
            .filter_map(|file| match self.archive_file(file) {
                Ok(moved) => moved,
                Err(e) => {
                    tracing::warn!(file, error = %e, "Failed to archive media file");
                    None
                }
            })
            .collect()
    }
}

impl Default for ArchiveDir {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_DIR)
    }
}
