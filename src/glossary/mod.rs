//! Glossary storage and deterministic term enforcement

pub mod commands;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// One forced source -> target substitution. Entry order in the glossary is
/// significant: later entries may rewrite text produced by earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub src: String,
    pub tgt: String,
    #[serde(default)]
    pub whole: bool,
}

/// Applies every entry in list order, each one globally over the current
/// text. This is a sequential rewrite pipeline, not a simultaneous
/// substitution: an entry sees the output of the entries before it.
pub fn apply_glossary(text: &str, entries: &[GlossaryEntry]) -> String {
    if entries.is_empty() {
        return text.to_string();
    }

    let mut out = text.to_string();
    for entry in entries {
        let escaped = regex::escape(&entry.src);
        // Whole-word matches are anchored to word boundaries, with
        // start/end-of-string accepted where the term itself begins or ends
        // with a non-word character.
        let pattern = if entry.whole {
            format!(r"(?:^|\b){escaped}(?:\b|$)")
        } else {
            escaped
        };
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::warn!("Skipping unmatchable glossary source '{}': {}", entry.src, e);
                continue;
            }
        };
        out = re.replace_all(&out, NoExpand(&entry.tgt)).into_owned();
    }
    out
}

/// Parses the plain-text exchange format: one `source = target` (or
/// tab-separated) pair per line, `#` and `//` comments ignored.
pub fn parse_glossary_file(content: &str, whole: bool) -> Vec<GlossaryEntry> {
    let mut entries = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        if let Some((src, tgt)) = parse_line(line) {
            entries.push(GlossaryEntry { src, tgt, whole });
        } else {
            tracing::warn!("Invalid glossary entry at line {}: {}", line_num + 1, line);
        }
    }
    entries
}

fn parse_line(line: &str) -> Option<(String, String)> {
    for sep in ['=', '\t'] {
        let parts: Vec<&str> = line.splitn(2, sep).collect();
        if parts.len() == 2 {
            let src = parts[0].trim();
            let tgt = parts[1].trim();
            if !src.is_empty() && !tgt.is_empty() {
                return Some((src.to_string(), tgt.to_string()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(src: &str, tgt: &str, whole: bool) -> GlossaryEntry {
        GlossaryEntry {
            src: src.to_string(),
            tgt: tgt.to_string(),
            whole,
        }
    }

    #[test]
    fn empty_glossary_returns_input_unchanged() {
        assert_eq!(apply_glossary("hello world", &[]), "hello world");
    }

    #[test]
    fn whole_word_matches_standalone_words_only() {
        let entries = vec![entry("cat", "묘", true)];
        assert_eq!(
            apply_glossary("cat concatenate cats", &entries),
            "묘 concatenate cats"
        );
    }

    #[test]
    fn non_whole_word_replaces_substrings() {
        let entries = vec![entry("cat", "묘", false)];
        assert_eq!(apply_glossary("concatenate", &entries), "con묘enate");
    }

    #[test]
    fn whole_word_matches_at_string_edges() {
        let entries = vec![entry("cat", "묘", true)];
        assert_eq!(apply_glossary("cat", &entries), "묘");
        assert_eq!(apply_glossary("the cat", &entries), "the 묘");
    }

    #[test]
    fn entries_apply_sequentially_in_list_order() {
        // The second entry rewrites text the first entry produced.
        let entries = vec![entry("dog", "hound", false), entry("hound", "wolf", false)];
        assert_eq!(apply_glossary("dog", &entries), "wolf");

        let reversed = vec![entry("hound", "wolf", false), entry("dog", "hound", false)];
        assert_eq!(apply_glossary("dog", &reversed), "hound");
    }

    #[test]
    fn replacement_is_global_per_entry() {
        let entries = vec![entry("a", "b", false)];
        assert_eq!(apply_glossary("a a a", &entries), "b b b");
    }

    #[test]
    fn non_overlapping_glossary_is_idempotent() {
        let entries = vec![entry("cat", "고양이", true), entry("dog", "개", true)];
        let once = apply_glossary("the cat and the dog", &entries);
        let twice = apply_glossary(&once, &entries);
        assert_eq!(once, twice);
        assert_eq!(once, "the 고양이 and the 개");
    }

    #[test]
    fn source_terms_are_treated_literally() {
        let entries = vec![entry("C++", "씨쁠쁠", false)];
        assert_eq!(apply_glossary("I like C++ a lot", &entries), "I like 씨쁠쁠 a lot");
    }

    #[test]
    fn target_dollar_signs_are_not_capture_expansions() {
        let entries = vec![entry("price", "$1", false)];
        assert_eq!(apply_glossary("the price", &entries), "the $1");
    }

    #[test]
    fn parse_supports_equals_and_tab_formats() {
        let content = "# comment\nSylvie = 실비\nProfessor\t교수\n// also a comment\nbroken line\n";
        let entries = parse_glossary_file(content, false);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], entry("Sylvie", "실비", false));
        assert_eq!(entries[1], entry("Professor", "교수", false));
    }
}
