//! Story and scene persistence errors.

/// Specific error conditions for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// No story exists under the given id
    #[display("Story not found: {}", _0)]
    StoryNotFound(String),
    /// No scene exists under the given id
    #[display("Scene not found: {}", _0)]
    SceneNotFound(String),
    /// A record with the same id already exists
    #[display("Duplicate id: {}", _0)]
    Duplicate(String),
    /// Backend-specific failure
    #[display("Storage backend failure: {}", _0)]
    Backend(String),
}

/// Error type for store operations.
///
/// # Examples
///
/// ```
/// use storyloom_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::SceneNotFound("abc".to_string()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The specific error condition
    pub kind: StorageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
