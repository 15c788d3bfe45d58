//! Gemini generateContent client
//!
//! One request, one response; the hard timeout is the only cancellation
//! path. Response interpretation is factored out of the I/O so the error
//! taxonomy is testable without a network.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ApiError;
use super::prompt;
use crate::config::Settings;
use crate::glossary::GlossaryEntry;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const TRANSLATE_SYSTEM: &str =
    "You translate text. Output ONLY the translation. If a glossary is supplied, obey it strictly.";
const EXPLAIN_SYSTEM: &str = "You are an expert translator and language teacher. Provide detailed \
     explanations about translations, their naturalness, usage contexts, and cultural nuances.";

const EXPLAIN_TEMPERATURE: f64 = 0.7;
const EXPLAIN_TOP_P: f64 = 0.95;

const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub settings: Settings,
}

impl ClientConfig {
    pub fn new(api_key: String, settings: Settings) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            settings,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    config: ClientConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn system(text: &str) -> Self {
        Self {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn user(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GenerateResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Validation(
                "No API key saved. Run 'lingopad key set <key>' or set GEMINI_API_KEY".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.settings.timeout_ms))
            .build()?;

        Ok(Self { config, client })
    }

    /// One translation round trip. Glossary enforcement happens after the
    /// call, in `glossary::apply_glossary`; here the glossary only feeds
    /// the prompt.
    pub async fn translate(
        &self,
        text: &str,
        src: &str,
        tgt: &str,
        glossary: &[GlossaryEntry],
    ) -> Result<String, ApiError> {
        let st = &self.config.settings;
        let body = GenerateRequest {
            system_instruction: Content::system(TRANSLATE_SYSTEM),
            contents: vec![Content::user(prompt::build_prompt(
                text, src, tgt, st, glossary,
            ))],
            generation_config: GenerationConfig {
                temperature: st.temperature,
                top_p: st.top_p,
                max_output_tokens: st.max_tokens,
            },
        };
        self.generate(&st.model, &body).await
    }

    /// Explanation fetch with a zero-cost cached path: when `cached` is
    /// present and no refresh is forced, it is returned without any request.
    pub async fn explain(
        &self,
        original: &str,
        translation: &str,
        tgt: &str,
        cached: Option<&str>,
        force_refresh: bool,
    ) -> Result<String, ApiError> {
        if let Some(cached) = cached {
            if !force_refresh {
                return Ok(cached.to_string());
            }
        }

        let st = &self.config.settings;
        let body = GenerateRequest {
            system_instruction: Content::system(EXPLAIN_SYSTEM),
            contents: vec![Content::user(prompt::build_explain_prompt(
                original,
                translation,
                tgt,
            ))],
            generation_config: GenerationConfig {
                temperature: EXPLAIN_TEMPERATURE,
                top_p: EXPLAIN_TOP_P,
                max_output_tokens: st.explain_max_tokens,
            },
        };
        self.generate(&st.explain_model, &body).await
    }

    async fn generate(&self, model: &str, body: &GenerateRequest) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url,
            urlencoding::encode(model)
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let diag = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %diag, "generateContent failed");
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }

        let data: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::EmptyResponse
            } else {
                ApiError::from(e)
            }
        })?;

        extract_output(data)
    }
}

/// Classifies a 2xx payload: safety block first, then token-limit
/// truncation, then the empty-response case, then success.
pub(crate) fn extract_output(data: GenerateResponse) -> Result<String, ApiError> {
    if let Some(reason) = data
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(ApiError::Blocked(reason));
    }

    let candidate = data.candidates.first();

    if candidate.and_then(|c| c.finish_reason.as_deref()) == Some(FINISH_MAX_TOKENS) {
        return Err(ApiError::Truncated);
    }

    let out = candidate
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
        .unwrap_or("")
        .trim();

    if out.is_empty() {
        tracing::debug!("Response carried no output text");
        return Err(ApiError::EmptyResponse);
    }

    Ok(out.to_string())
}
