//! Message catalogs and prompt template rendering.
//!
//! Catalogs are TOML documents whose nested tables flatten into dotted keys:
//!
//! ```toml
//! [prompts]
//! brief = "Write an outline for {{title}}"
//! ```
//!
//! becomes the key `prompts.brief`. A bundled English catalog is always the
//! base layer; override files only replace the keys they define.

use std::collections::HashMap;
use std::path::Path;
use storyloom_error::{LocaleError, StoryloomResult};
use storyloom_interface::Translator;
use tracing::{debug, error, instrument};

const BUNDLED_CATALOG: &str = include_str!("../locales/en.toml");

/// A flat key → text catalog implementing [`Translator`].
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    entries: HashMap<String, String>,
}

impl LocaleCatalog {
    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is neither a
    /// string nor a table.
    pub fn from_toml_str(text: &str) -> StoryloomResult<Self> {
        let table: toml::Table = toml::from_str(text)
            .map_err(|e| LocaleError::new(format!("Failed to parse catalog: {}", e)))?;

        let mut entries = HashMap::new();
        flatten("", &table, &mut entries)?;
        Ok(Self { entries })
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog fails to parse.
    pub fn bundled() -> StoryloomResult<Self> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    /// The bundled catalog with the keys of the file at `path` laid over it.
    ///
    /// # Errors
    ///
    /// Returns an error if either catalog cannot be read or parsed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn with_overrides(path: impl AsRef<Path>) -> StoryloomResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LocaleError::new(format!("Failed to read catalog: {}", e)))?;
        let overrides = Self::from_toml_str(&text)?;
        debug!(keys = overrides.len(), "Loaded catalog overrides");
        Ok(Self::bundled()?.merge(overrides))
    }

    /// Lay `other` over this catalog; keys in `other` win.
    pub fn merge(mut self, other: LocaleCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Look a key up without falling back.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for LocaleCatalog {
    fn translate(&self, key: &str) -> String {
        self.get(key).map(str::to_string).unwrap_or_else(|| {
            debug!(key, "Missing translation");
            key.to_string()
        })
    }
}

/// Catalog used when the caller does not supply a translator.
pub(crate) fn default_catalog() -> LocaleCatalog {
    LocaleCatalog::bundled().unwrap_or_else(|e| {
        error!(error = %e, "Bundled catalog is invalid, translations fall back to keys");
        LocaleCatalog::default()
    })
}

fn flatten(
    prefix: &str,
    table: &toml::Table,
    entries: &mut HashMap<String, String>,
) -> StoryloomResult<()> {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::String(text) => {
                entries.insert(full_key, text.clone());
            }
            toml::Value::Table(nested) => flatten(&full_key, nested, entries)?,
            other => {
                return Err(LocaleError::new(format!(
                    "Catalog key '{}' must be a string or table, found {}",
                    full_key,
                    other.type_str()
                ))
                .into());
            }
        }
    }
    Ok(())
}

/// Substitute `{{name}}` placeholders in `template`.
///
/// Placeholders without a matching variable are left untouched so a
/// missing variable shows up in the prompt instead of vanishing.
///
/// # Errors
///
/// Returns an error if the placeholder pattern cannot be compiled.
///
/// # Examples
///
/// ```
/// use storyloom_narrative::render_template;
///
/// let text = render_template("Scene {{number}} of {{ total }}", &[("number", "2"), ("total", "5")])
///     .unwrap();
/// assert_eq!(text, "Scene 2 of 5");
/// ```
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> StoryloomResult<String> {
    let re = regex::Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}")
        .map_err(|e| LocaleError::new(format!("Invalid template regex: {}", e)))?;

    let rendered = re.replace_all(template, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_has_every_prompt() {
        let catalog = LocaleCatalog::bundled().unwrap();
        for key in [
            "prompts.system",
            "prompts.brief",
            "prompts.scene",
            "prompts.summary",
            "prompts.meta",
            "prompts.cover",
            "notifications.cover_failed",
            "notifications.payment_failed",
            "notifications.payment_unconfirmed",
        ] {
            assert!(catalog.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let catalog = LocaleCatalog::default();
        assert_eq!(catalog.translate("labels.unknown"), "labels.unknown");
    }

    #[test]
    fn test_merge_overrides_only_given_keys() {
        let base = LocaleCatalog::from_toml_str("[a]\nx = \"1\"\ny = \"2\"").unwrap();
        let over = LocaleCatalog::from_toml_str("[a]\ny = \"3\"").unwrap();
        let merged = base.merge(over);
        assert_eq!(merged.get("a.x"), Some("1"));
        assert_eq!(merged.get("a.y"), Some("3"));
    }

    #[test]
    fn test_non_string_values_are_rejected() {
        assert!(LocaleCatalog::from_toml_str("[a]\nx = 1").is_err());
    }

    #[test]
    fn test_unknown_placeholders_survive() {
        let text = render_template("{{known}} and {{unknown}}", &[("known", "yes")]).unwrap();
        assert_eq!(text, "yes and {{unknown}}");
    }
}
