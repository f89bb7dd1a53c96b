//! Publish protocol error types.

/// Post-level publish failures.
///
/// None of these abort a batch: the failing post stays unpublished and the
/// batch driver moves on to the next post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Post has no media to publish
    #[display("Post has no media")]
    NoMedia,
    /// Every carousel child failed to produce a container
    #[display("No valid children created for carousel")]
    NoValidChildren,
    /// Post kind is not one the publisher knows how to handle
    #[display("Unsupported post kind: {}", _0)]
    UnsupportedPostKind(String),
    /// No container id was obtained for the post
    #[display("No creation id obtained: {}", _0)]
    NoContainer(String),
    /// The publish call returned no published media id
    #[display("Publish returned no media id: {}", _0)]
    PublishRejected(String),
}

/// Publish error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use postprep_error::{PublishError, PublishErrorKind};
    ///
    /// let err = PublishError::new(PublishErrorKind::NoValidChildren);
    /// assert_eq!(err.kind(), &PublishErrorKind::NoValidChildren);
    /// ```
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PublishErrorKind {
        &self.kind
    }
}
