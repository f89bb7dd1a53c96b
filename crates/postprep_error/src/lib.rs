//! Error types for postprep.
//!
//! This crate provides the error types shared by the project store, the
//! storage layer and the publisher.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use postprep_error::{ConfigError, PostprepResult};
//!
//! fn load_token() -> PostprepResult<String> {
//!     Err(ConfigError::new("ACCESS_TOKEN not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got: {}", token),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod publish;
mod storage;

pub use config::ConfigError;
pub use error::{PostprepError, PostprepErrorKind, PostprepResult};
pub use http::HttpError;
pub use json::JsonError;
pub use publish::{PublishError, PublishErrorKind};
pub use storage::{StorageError, StorageErrorKind};
