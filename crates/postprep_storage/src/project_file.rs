//! JSON project file persistence.

use postprep_core::Project;
use postprep_error::{PostprepResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// File name used when none is given.
pub const DEFAULT_PROJECT_FILE: &str = "projectDataStruct.json";

/// A project JSON file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    path: PathBuf,
}

impl ProjectFile {
    /// Refer to a project file; nothing is read until [`ProjectFile::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the project.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file is missing or unreadable and a
    /// JSON error if it does not hold a post or an array of posts.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> PostprepResult<Project> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(self.path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        })?;

        let project = Project::from_json(&body)?;
        tracing::info!(posts = project.len(), "Loaded project");
        Ok(project)
    }

    /// Load the project, or start an empty one when the file does not exist yet.
    pub fn load_or_default(&self) -> PostprepResult<Project> {
        if self.path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.path.display(), "Project file not found, starting empty");
            Ok(Project::default())
        }
    }

    /// Write the project as a pretty-printed JSON array.
    ///
    /// The body goes to a sibling temporary file first and is then renamed
    /// over the target.
    #[tracing::instrument(skip(self, project), fields(path = %self.path.display(), posts = project.len()))]
    pub fn save(&self, project: &Project) -> PostprepResult<()> {
        let body = project.to_json()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, body).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        tracing::info!("Saved project");
        Ok(())
    }
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_FILE)
    }
}
