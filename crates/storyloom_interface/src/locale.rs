//! Localization lookup.

/// Lookup from message key to localized string.
///
/// Implementations return the key itself when no translation exists.
pub trait Translator: Send + Sync {
    /// Localized text for `key`.
    fn translate(&self, key: &str) -> String;
}
