//! Story metadata returned by the meta stage and its merge onto a story.

use crate::extraction::extract_object;
use serde_json::{Map, Value};
use storyloom_core::Story;
use tracing::debug;

/// Fields recognised in a meta payload. Absent, blank or wrongly typed
/// fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct StoryMeta {
    /// Title candidates, best first
    story_titles: Vec<String>,
    description: Option<String>,
    summary: Option<String>,
    summary_en: Option<String>,
    cover_text: Option<String>,
    cover_text_en: Option<String>,
}

impl StoryMeta {
    /// Read the recognised fields out of a parsed JSON object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            story_titles: titles(field(object, &["storyTitles", "story_titles"])),
            description: text(field(object, &["description"])),
            summary: text(field(object, &["summary"])),
            summary_en: text(field(object, &["summaryEn", "summary_en"])),
            cover_text: text(field(object, &["coverText", "cover_text"])),
            cover_text_en: text(field(object, &["coverTextEn", "cover_text_en"])),
        }
    }

    /// Merge the payload onto `story`.
    ///
    /// Fallbacks are asymmetric: `summary` and `cover_text`
    /// keep their previous values when the payload lacks them, while
    /// `description` and the English fields are cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_core::Story;
    /// use storyloom_narrative::extract_story_meta;
    ///
    /// let story = Story::new("Draft").with_summary("old summary");
    /// let meta = extract_story_meta(r#"{"storyTitles": ["The Kite"], "coverText": "A red kite"}"#)
    ///     .unwrap();
    /// let merged = meta.merge_into(&story);
    ///
    /// assert_eq!(merged.title, "The Kite");
    /// assert_eq!(merged.summary.as_deref(), Some("old summary"));
    /// assert_eq!(merged.cover_text_en.as_deref(), Some("A red kite"));
    /// ```
    pub fn merge_into(&self, story: &Story) -> Story {
        let mut merged = story.clone();

        if let Some(first) = self.story_titles.first() {
            merged.title = first.clone();
        }
        merged.names = self.story_titles.clone();
        merged.description = self.description.clone();
        if let Some(summary) = &self.summary {
            merged.summary = Some(summary.clone());
        }
        merged.summary_en = self.summary_en.clone().or_else(|| self.summary.clone());
        if let Some(cover_text) = &self.cover_text {
            merged.cover_text = Some(cover_text.clone());
        }
        merged.cover_text_en = self
            .cover_text_en
            .clone()
            .or_else(|| self.cover_text.clone());

        merged
    }
}

/// Extract a [`StoryMeta`] from raw model output.
///
/// Returns `None` when no JSON object can be found. Never panics.
pub fn extract_story_meta(raw: &str) -> Option<StoryMeta> {
    let object = extract_object(raw)?;
    let meta = StoryMeta::from_object(&object);
    debug!(
        titles = meta.story_titles.len(),
        has_summary = meta.summary.is_some(),
        has_cover_text = meta.cover_text.is_some(),
        "Extracted story meta"
    );
    Some(meta)
}

fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| object.get(*name))
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Titles arrive as an array of strings, occasionally as a single string.
fn titles(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|item| text(Some(item))).collect(),
        Some(single @ Value::String(_)) => text(Some(single)).into_iter().collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Story {
        Story::new("Old Title")
            .with_names(vec!["Old Title".to_string()])
            .with_description("old description")
            .with_summary("old summary")
            .with_summary_en("old summary en")
            .with_cover_text("old cover")
            .with_cover_text_en("old cover en")
    }

    #[test]
    fn test_full_payload_replaces_everything() {
        let raw = r#"```json
{"storyTitles": ["Moonlit", "Nightfall"], "description": "d", "summary": "s",
 "summaryEn": "s-en", "coverText": "c", "coverTextEn": "c-en"}
```"#;
        let merged = extract_story_meta(raw).unwrap().merge_into(&existing());

        assert_eq!(merged.title, "Moonlit");
        assert_eq!(merged.names, vec!["Moonlit", "Nightfall"]);
        assert_eq!(merged.description.as_deref(), Some("d"));
        assert_eq!(merged.summary.as_deref(), Some("s"));
        assert_eq!(merged.summary_en.as_deref(), Some("s-en"));
        assert_eq!(merged.cover_text.as_deref(), Some("c"));
        assert_eq!(merged.cover_text_en.as_deref(), Some("c-en"));
    }

    #[test]
    fn test_empty_payload_keeps_summary_and_cover_text_only() {
        let merged = extract_story_meta("{}").unwrap().merge_into(&existing());

        assert_eq!(merged.title, "Old Title");
        assert!(merged.names.is_empty());
        assert!(merged.description.is_none());
        assert_eq!(merged.summary.as_deref(), Some("old summary"));
        assert!(merged.summary_en.is_none());
        assert_eq!(merged.cover_text.as_deref(), Some("old cover"));
        assert!(merged.cover_text_en.is_none());
    }

    #[test]
    fn test_english_fields_fall_back_to_payload_originals() {
        let raw = r#"{"summary": "s", "coverText": "c"}"#;
        let merged = extract_story_meta(raw).unwrap().merge_into(&existing());

        assert_eq!(merged.summary_en.as_deref(), Some("s"));
        assert_eq!(merged.cover_text_en.as_deref(), Some("c"));
    }

    #[test]
    fn test_wrong_types_and_blanks_are_absent() {
        let raw = r#"{"storyTitles": [1, "  ", "Real"], "description": 5, "summary": "   ",
                      "cover_text_en": "snake case"}"#;
        let meta = extract_story_meta(raw).unwrap();

        assert_eq!(meta.story_titles(), &vec!["Real".to_string()]);
        assert!(meta.description().is_none());
        assert!(meta.summary().is_none());
        assert_eq!(meta.cover_text_en().as_deref(), Some("snake case"));
    }

    #[test]
    fn test_single_string_title() {
        let meta = extract_story_meta(r#"{"storyTitles": "Only One"}"#).unwrap();
        assert_eq!(meta.story_titles(), &vec!["Only One".to_string()]);
    }

    #[test]
    fn test_unparseable_text_yields_none() {
        assert!(extract_story_meta("I could not think of anything.").is_none());
    }
}
