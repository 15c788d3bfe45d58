//! Prompt construction
//!
//! Pure and deterministic: the block order (role framing, style directives,
//! glossary, custom prompt, output-format instruction, source text) is fixed
//! so prompts are reproducible and testable.

use crate::config::{Settings, Tone, Variety};
use crate::glossary::GlossaryEntry;

/// Sentinel source-language value meaning "let the model detect it".
pub const AUTO_LANG: &str = "auto";

pub const PRESERVE_DIRECTIVE: &str =
    "Preserve inline markup (Markdown, placeholders) exactly as given.";

fn is_english_target(tgt: &str) -> bool {
    matches!(tgt, "en" | "en-US" | "en-GB")
}

pub fn style_directives(settings: &Settings, tgt: &str) -> Vec<&'static str> {
    let mut lines = Vec::new();
    match settings.tone {
        Tone::Formal => lines.push("Use a formal tone appropriate for professional documents."),
        Tone::Casual => lines.push("Use a natural conversational tone."),
        Tone::Neutral => {}
    }
    // Regional conventions only make sense for English-family targets.
    if is_english_target(tgt) {
        match settings.variety {
            Variety::Us => lines.push("Use American English conventions."),
            Variety::Uk => lines.push("Use British English conventions."),
            Variety::Auto => {}
        }
    }
    if settings.preserve {
        lines.push(PRESERVE_DIRECTIVE);
    }
    lines
}

pub fn build_prompt(
    text: &str,
    src: &str,
    tgt: &str,
    settings: &Settings,
    glossary: &[GlossaryEntry],
) -> String {
    let from = if src == AUTO_LANG { "auto-detect" } else { src };

    let mut prompt = format!(
        "You are a professional translation engine. \
         Translate the following text from {from} to {tgt}. "
    );
    prompt.push_str(&style_directives(settings, tgt).join(" "));

    if !glossary.is_empty() {
        prompt.push_str("\n\nGlossary (terms to enforce):");
        for entry in glossary {
            let whole = if entry.whole { " (whole word)" } else { "" };
            prompt.push_str(&format!("\n- \"{}\" -> \"{}\"{}", entry.src, entry.tgt, whole));
        }
    }

    let custom = settings.custom_prompt.trim();
    if !custom.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(custom);
    }

    prompt.push_str("\n\nReturn only the translation with no quotes or extra commentary.");
    prompt.push_str("\n\nText:\n");
    prompt.push_str(text);
    prompt
}

pub fn build_explain_prompt(original: &str, translation: &str, tgt: &str) -> String {
    format!(
        "You are an expert translator and language teacher.\n\
         \n\
         Original: \"{original}\"\n\
         Translation: \"{translation}\"\n\
         \n\
         Provide a detailed explanation, written in the '{tgt}' language, with line breaks for readability:\n\
         \n\
         1. Alternative phrasings:\n\
         \x20  - Compare whether this translation reads naturally and how else it could be expressed.\n\
         \x20  - Offer other options, for example more colloquial or formal wording, more concise or detailed wording.\n\
         \n\
         2. Native-speaker judgment with examples:\n\
         \x20  - Would a native speaker actually use this wording, or reach for something else?\n\
         \x20  - Show more natural alternatives as example sentences.\n\
         \x20  - Explain how the expressions differ and the contexts where each fits.\n\
         \n\
         Use line breaks between sections to improve readability. The answer may run somewhat longer if needed to be thorough."
    )
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
    fn auto_source_becomes_auto_detect() {
        let prompt = build_prompt("hi", "auto", "ko", &Settings::default(), &[]);
        assert!(prompt.contains("from auto-detect to ko"));

        let prompt = build_prompt("hi", "ja", "ko", &Settings::default(), &[]);
        assert!(prompt.contains("from ja to ko"));
    }

    #[test]
    fn preserve_directive_appears_exactly_once_when_enabled() {
        let on = Settings::default();
        assert!(on.preserve);
        let prompt = build_prompt("hi", "en", "ko", &on, &[]);
        assert_eq!(prompt.matches(PRESERVE_DIRECTIVE).count(), 1);

        let off = Settings {
            preserve: false,
            ..Settings::default()
        };
        let prompt = build_prompt("hi", "en", "ko", &off, &[]);
        assert_eq!(prompt.matches(PRESERVE_DIRECTIVE).count(), 0);
    }

    #[test]
    fn tone_directives_follow_the_setting() {
        let formal = Settings {
            tone: Tone::Formal,
            ..Settings::default()
        };
        assert!(build_prompt("x", "en", "ko", &formal, &[])
            .contains("Use a formal tone appropriate for professional documents."));

        let casual = Settings {
            tone: Tone::Casual,
            ..Settings::default()
        };
        assert!(build_prompt("x", "en", "ko", &casual, &[])
            .contains("Use a natural conversational tone."));

        assert!(!build_prompt("x", "en", "ko", &Settings::default(), &[]).contains("tone"));
    }

    #[test]
    fn variety_is_gated_to_english_targets() {
        let us = Settings {
            variety: Variety::Us,
            ..Settings::default()
        };
        assert!(build_prompt("x", "ko", "en", &us, &[])
            .contains("Use American English conventions."));
        assert!(build_prompt("x", "ko", "en-US", &us, &[])
            .contains("Use American English conventions."));
        assert!(!build_prompt("x", "en", "ko", &us, &[]).contains("American"));

        let uk = Settings {
            variety: Variety::Uk,
            ..Settings::default()
        };
        assert!(build_prompt("x", "ko", "en-GB", &uk, &[])
            .contains("Use British English conventions."));
    }

    #[test]
    fn glossary_block_lists_entries_and_flags_whole_word() {
        let glossary = vec![entry("cat", "묘", true), entry("dog", "견", false)];
        let prompt = build_prompt("x", "en", "ko", &Settings::default(), &glossary);
        assert!(prompt.contains("Glossary (terms to enforce):"));
        assert!(prompt.contains("- \"cat\" -> \"묘\" (whole word)"));
        assert!(prompt.contains("- \"dog\" -> \"견\"\n"));

        let prompt = build_prompt("x", "en", "ko", &Settings::default(), &[]);
        assert!(!prompt.contains("Glossary"));
    }

    #[test]
    fn block_order_is_fixed() {
        let settings = Settings {
            custom_prompt: "Keep it short.".to_string(),
            ..Settings::default()
        };
        let glossary = vec![entry("cat", "묘", false)];
        let prompt = build_prompt("the cat", "en", "ko", &settings, &glossary);

        let directives = prompt.find(PRESERVE_DIRECTIVE).unwrap();
        let gloss = prompt.find("Glossary (terms to enforce):").unwrap();
        let custom = prompt.find("Keep it short.").unwrap();
        let format = prompt
            .find("Return only the translation with no quotes or extra commentary.")
            .unwrap();
        let text = prompt.find("Text:\nthe cat").unwrap();

        assert!(directives < gloss);
        assert!(gloss < custom);
        assert!(custom < format);
        assert!(format < text);
        assert!(prompt.ends_with("Text:\nthe cat"));
    }

    #[test]
    fn explain_prompt_embeds_both_texts() {
        let prompt = build_explain_prompt("good morning", "좋은 아침", "ko");
        assert!(prompt.contains("Original: \"good morning\""));
        assert!(prompt.contains("Translation: \"좋은 아침\""));
        assert!(prompt.contains("'ko'"));
    }
}
