//! HTTP error types.

/// Graph API transport failure with source location.
///
/// Raised when a request never produced a response body: connection
/// failures, TLS errors, timeouts. A Graph API rejection is not an
/// `HttpError`; it arrives as a response without an id.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use postprep_error::HttpError;
    ///
    /// let err = HttpError::new("POST https://graph.facebook.com/v21.0/1784/media failed: timed out");
    /// assert!(err.message.contains("/media"));
    /// assert!(err.to_string().starts_with("HTTP Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
