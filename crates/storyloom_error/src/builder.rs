//! Errors raised while assembling a provider request.

/// Why a request could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("{} is missing required field `{}`", target, field)]
    MissingField {
        /// Type being built
        target: &'static str,
        /// Name of the unset field
        field: String,
    },

    /// A field was set to a value the target rejects
    #[display("{} rejected a value: {}", target, reason)]
    Invalid {
        /// Type being built
        target: &'static str,
        /// Validation message
        reason: String,
    },
}

/// Request assembly error with location tracking.
///
/// # Examples
///
/// ```
/// use storyloom_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::MissingField {
///     target: "ChatRequest",
///     field: "model".to_string(),
/// });
/// assert!(err.to_string().contains("`model`"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
