//! Splitting a brief into scene stubs and building scene prompts.
//!
//! A brief is free text produced by the model. Entries are recognised by an
//! ordinal marker at the start of a line (`1.`, `2)`, `Scene 3:`, `## 4 -`),
//! with optional markdown heading and emphasis around it. Lines after a
//! marker belong to that entry until the next marker. A brief without any
//! marker is split into blank-line separated paragraphs instead.
//!
//! Everything here is pure: the same brief always yields the same stubs and
//! the same prompts.

use crate::locale::render_template;
use storyloom_core::SceneStub;
use storyloom_error::StoryloomResult;
use storyloom_interface::Translator;

const MAX_TITLE_CHARS: usize = 80;
const ORDINAL_WORDS: [&str; 4] = ["scene", "episode", "chapter", "part"];

/// Split a brief into ordered scene stubs.
///
/// # Examples
///
/// ```
/// use storyloom_narrative::format_brief;
///
/// let brief = "Outline:\n1. The Storm: Anna sails out.\n2. The Island: She lands.\n";
/// let stubs = format_brief(brief);
///
/// assert_eq!(stubs.len(), 2);
/// assert_eq!(stubs[0].ordinal, 1);
/// assert_eq!(stubs[0].title, "The Storm");
/// assert_eq!(stubs[1].title, "The Island");
/// ```
pub fn format_brief(brief: &str) -> Vec<SceneStub> {
    let entries = split_marked(brief).unwrap_or_else(|| split_paragraphs(brief));

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (heading, text))| {
            let ordinal = index + 1;
            let title = derive_title(&heading).unwrap_or_else(|| format!("Scene {}", ordinal));
            SceneStub {
                ordinal,
                title,
                text,
            }
        })
        .collect()
}

/// Build the content prompt for the stub at `ordinal` (1-based).
///
/// The prompt carries the whole outline so the model keeps continuity, plus
/// the position and text of the scene to write.
///
/// # Errors
///
/// Returns an error if `ordinal` is outside the stub list or the localized
/// template cannot be rendered.
pub fn build_scene_prompt(
    stubs: &[SceneStub],
    ordinal: usize,
    translator: &dyn Translator,
) -> StoryloomResult<String> {
    let stub = stubs
        .iter()
        .find(|stub| stub.ordinal == ordinal)
        .ok_or_else(|| {
            storyloom_error::LocaleError::new(format!(
                "No scene stub at position {} (brief has {})",
                ordinal,
                stubs.len()
            ))
        })?;

    let outline = stubs
        .iter()
        .map(|stub| stub.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let number = ordinal.to_string();
    let total = stubs.len().to_string();

    render_template(
        &translator.translate("prompts.scene"),
        &[
            ("outline", outline.as_str()),
            ("number", number.as_str()),
            ("total", total.as_str()),
            ("title", stub.title.as_str()),
            ("stub", stub.text.as_str()),
        ],
    )
}

/// Entries introduced by ordinal markers, or `None` when the brief has none.
fn split_marked(brief: &str) -> Option<Vec<(String, String)>> {
    let mut entries: Vec<(String, Vec<&str>)> = Vec::new();

    for line in brief.lines() {
        match parse_marker(line) {
            Some(rest) => entries.push((rest.to_string(), vec![line.trim()])),
            // Preamble before the first marker is dropped.
            None => {
                if let Some((_, lines)) = entries.last_mut() {
                    if !line.trim().is_empty() {
                        lines.push(line.trim());
                    }
                }
            }
        }
    }

    if entries.is_empty() {
        return None;
    }

    Some(
        entries
            .into_iter()
            .map(|(heading, lines)| (heading, lines.join("\n")))
            .collect(),
    )
}

fn split_paragraphs(brief: &str) -> Vec<(String, String)> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in brief.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                let heading = current[0].to_string();
                paragraphs.push((heading, current.join("\n")));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }

    paragraphs
}

/// If `line` starts with an ordinal marker, return the text after it.
fn parse_marker(line: &str) -> Option<&str> {
    let mut rest = line.trim_start();
    rest = rest.trim_start_matches('#').trim_start();
    rest = rest.trim_start_matches(['*', '_']).trim_start();

    let mut had_word = false;
    for word in ORDINAL_WORDS {
        let Some(prefix) = rest.get(..word.len()) else {
            continue;
        };
        if !prefix.eq_ignore_ascii_case(word) {
            continue;
        }
        let after = &rest[word.len()..];
        if after.starts_with(char::is_whitespace) {
            rest = after.trim_start();
            had_word = true;
            break;
        }
    }

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let after_digits = rest[digits..].trim_start_matches(['*', '_']);
    let trimmed = after_digits.trim_start();

    let mut chars = trimmed.chars();
    let first = chars.next();
    let second = chars.next();
    match first {
        None if had_word => Some(""),
        Some('.') if second.is_some_and(|c| c.is_ascii_digit()) => None,
        Some('.' | ')' | ':' | '-') => Some(trimmed[1..].trim()),
        Some(_) if had_word && after_digits.starts_with(char::is_whitespace) => Some(trimmed),
        _ => None,
    }
}

/// Title from the text after a marker, `None` when nothing usable remains.
fn derive_title(heading: &str) -> Option<String> {
    let cleaned = heading.trim().trim_start_matches(['*', '_', '#']).trim();

    let cut = [":", " - ", " — ", " – ", ". "]
        .iter()
        .filter_map(|separator| cleaned.find(separator))
        .min()
        .unwrap_or(cleaned.len());

    let title = cleaned[..cut]
        .trim()
        .trim_matches(['*', '_', '"', '\''])
        .trim_end_matches('.')
        .trim();

    if title.is_empty() {
        return None;
    }

    Some(truncate_words(title, MAX_TITLE_CHARS))
}

fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    match head.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => head[..pos].trim_end().to_string(),
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocaleCatalog;

    #[test]
    fn test_numbered_list_with_continuation_lines() {
        let brief = "Here is the plan.\n\n1. Departure: Mira leaves home.\nShe takes the old map.\n2) The Forest - wolves circle.\n3. Return\n";
        let stubs = format_brief(brief);

        assert_eq!(stubs.len(), 3);
        assert_eq!(stubs[0].title, "Departure");
        assert_eq!(
            stubs[0].text,
            "1. Departure: Mira leaves home.\nShe takes the old map."
        );
        assert_eq!(stubs[1].title, "The Forest");
        assert_eq!(stubs[2].title, "Return");
        assert_eq!(
            stubs.iter().map(|s| s.ordinal).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_scene_words_and_markdown_headings() {
        let brief = "## Scene 1: **Arrival**\nThe train stops.\n\n**Scene 2** - Night\nLights go out.\nChapter 3\nMorning comes.";
        let stubs = format_brief(brief);

        assert_eq!(stubs.len(), 3);
        assert_eq!(stubs[0].title, "Arrival");
        assert_eq!(stubs[1].title, "Night");
        assert_eq!(stubs[2].title, "Scene 3");
        assert!(stubs[2].text.contains("Morning comes."));
    }

    #[test]
    fn test_paragraph_fallback() {
        let brief = "A quiet village wakes.\nThe baker is missing.\n\n\nThe search begins: everyone helps.";
        let stubs = format_brief(brief);

        assert_eq!(stubs.len(), 2);
        assert_eq!(stubs[0].title, "A quiet village wakes");
        assert_eq!(stubs[1].title, "The search begins");
    }

    #[test]
    fn test_decimal_numbers_are_not_markers() {
        let brief = "1. Start\n3.5 million stars watched.\n2. End";
        let stubs = format_brief(brief);

        assert_eq!(stubs.len(), 2);
        assert!(stubs[0].text.contains("3.5 million"));
    }

    #[test]
    fn test_empty_brief_has_no_stubs() {
        assert!(format_brief("").is_empty());
        assert!(format_brief("   \n\n  ").is_empty());
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let brief = "1. One\n2. Two\n3. Three";
        assert_eq!(format_brief(brief), format_brief(brief));
    }

    #[test]
    fn test_long_titles_are_truncated_on_word_boundary() {
        let words = "word ".repeat(40);
        let stubs = format_brief(&format!("1. {}", words));
        assert!(stubs[0].title.chars().count() <= MAX_TITLE_CHARS);
        assert!(stubs[0].title.ends_with("word"));
    }

    #[test]
    fn test_scene_prompt_mentions_position_and_outline() {
        let catalog = LocaleCatalog::default();
        let stubs = format_brief("1. Dawn: the ship leaves.\n2. Dusk: the ship returns.");

        let prompt = build_scene_prompt(&stubs, 2, &catalog).unwrap();
        assert!(prompt.contains("the ship leaves"));
        assert!(prompt.contains("Dusk"));
        assert!(prompt.contains('2'));
        assert_eq!(prompt, build_scene_prompt(&stubs, 2, &catalog).unwrap());
    }

    #[test]
    fn test_scene_prompt_out_of_range() {
        let catalog = LocaleCatalog::default();
        let stubs = format_brief("1. Only");
        assert!(build_scene_prompt(&stubs, 2, &catalog).is_err());
        assert!(build_scene_prompt(&stubs, 0, &catalog).is_err());
    }
}
