//! Locale catalog error types.

/// Locale Error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Locale Error: {} at line {} in {}", message, line, file)]
pub struct LocaleError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl LocaleError {
    /// Create a new LocaleError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::LocaleError;
    ///
    /// let err = LocaleError::new("missing [prompts] table");
    /// assert!(err.message.contains("missing [prompts] table"));
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
