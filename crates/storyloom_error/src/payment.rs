//! Payment gate error types.

/// Payment Error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Payment Error: {} at line {} in {}", message, line, file)]
pub struct PaymentError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PaymentError {
    /// Create a new PaymentError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_error::PaymentError;
    ///
    /// let err = PaymentError::new("card declined");
    /// assert!(err.message.contains("card declined"));
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
