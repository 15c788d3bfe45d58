//! Settings persisted in the store

pub mod commands;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Formal,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variety {
    #[default]
    Auto,
    Us,
    Uk,
}

/// Flat settings record. Per-field serde defaults are the single default
/// table: a loaded value is always fully populated, whatever subset was
/// persisted. Unknown fields are kept in `extra` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub model: String,

    /// Model used for explanation requests
    pub explain_model: String,

    pub temperature: f64,
    pub top_p: f64,

    /// Max output tokens for translation requests
    pub max_tokens: u32,

    /// Max output tokens for explanation requests (longer responses)
    pub explain_max_tokens: u32,

    /// Hard per-request deadline in milliseconds
    pub timeout_ms: u64,

    pub tone: Tone,
    pub variety: Variety,

    /// Keep inline markup and placeholders verbatim in the translation
    pub preserve: bool,

    /// Free-form extra prompt appended after the glossary block
    pub custom_prompt: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            explain_model: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            top_p: 0.95,
            max_tokens: 2048,
            explain_max_tokens: 4096,
            timeout_ms: 15000,
            tone: Tone::default(),
            variety: Variety::default(),
            preserve: true,
            custom_prompt: String::new(),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_fills_every_default() {
        let st: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(st, Settings::default());
        assert_eq!(st.model, "gemini-1.5-flash");
        assert_eq!(st.max_tokens, 2048);
        assert_eq!(st.timeout_ms, 15000);
        assert!(st.preserve);
    }

    #[test]
    fn partial_object_keeps_defaults_for_absent_fields() {
        let st: Settings =
            serde_json::from_str(r#"{"model":"gemini-1.5-pro","tone":"formal"}"#).unwrap();
        assert_eq!(st.model, "gemini-1.5-pro");
        assert_eq!(st.tone, Tone::Formal);
        assert_eq!(st.explain_max_tokens, 4096);
        assert_eq!(st.variety, Variety::Auto);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let st: Settings =
            serde_json::from_str(r#"{"temperature":0.5,"someFutureFlag":true}"#).unwrap();
        assert_eq!(st.extra.get("someFutureFlag"), Some(&serde_json::json!(true)));

        let back = serde_json::to_value(&st).unwrap();
        assert_eq!(back["someFutureFlag"], serde_json::json!(true));
        assert_eq!(back["temperature"], serde_json::json!(0.5));
    }
}
