//! Error types for the Storyloom workspace.
//!
//! This crate provides the foundation error types used by every other
//! Storyloom crate.
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
//! use storyloom_error::{StoryloomResult, StorageError, StorageErrorKind};
//!
//! fn load_story() -> StoryloomResult<String> {
//!     Err(StorageError::new(StorageErrorKind::StoryNotFound("42".to_string())))?
//! }
//!
//! assert!(load_story().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod http;
mod locale;
mod payment;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StoryloomError, StoryloomErrorKind, StoryloomResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use locale::LocaleError;
pub use payment::PaymentError;
pub use storage::{StorageError, StorageErrorKind};
