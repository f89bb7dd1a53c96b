//! Building posts from a folder of media files.

use postprep_core::{Post, Project, SUPPORTED_EXTENSIONS};
use postprep_error::{PostprepResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// List importable media files in `dir`, sorted by file name.
///
/// Only regular files whose extension is one of [`SUPPORTED_EXTENSIONS`]
/// (case-insensitive) are returned; subdirectories are not searched.
#[tracing::instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn scan_media_files(dir: impl AsRef<Path>) -> PostprepResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryRead(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(count = files.len(), "Scanned media files");
    Ok(files)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Append one single-media post per importable file in `dir`.
///
/// Returns the index of the first new post, or `None` when nothing was found.
pub fn import_directory(project: &mut Project, dir: impl AsRef<Path>) -> PostprepResult<Option<usize>> {
    let files = scan_media_files(dir)?;
    let first = project.extend(files.iter().map(Post::from_file));
    tracing::info!(imported = files.len(), "Imported media directory");
    Ok(first)
}
