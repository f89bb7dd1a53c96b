//! Top-level error wrapper types.

use crate::{ConfigError, HttpError, JsonError, PublishError, StorageError};

/// Every error condition postprep can report.
///
/// # Examples
///
/// ```
/// use postprep_error::{HttpError, PostprepError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: PostprepError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PostprepErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem error
    #[from(StorageError)]
    Storage(StorageError),
    /// Post-level publish failure
    #[from(PublishError)]
    Publish(PublishError),
}

/// postprep error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("postprep Error: {}", _0)]
pub struct PostprepError(Box<PostprepErrorKind>);

impl PostprepError {
    /// Create a new error from a kind.
    pub fn new(kind: PostprepErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PostprepErrorKind {
        &self.0
    }
}

impl<T> From<T> for PostprepError
where
    T: Into<PostprepErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for postprep operations.
pub type PostprepResult<T> = std::result::Result<T, PostprepError>;
