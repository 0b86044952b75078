//! AI enhancement: reformat a snippet for presentation, then explain it.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::infrastructure::config::AppConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhanceError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Failed to reach the text generation service: {0}")]
    Network(String),

    #[error("Text generation service returned {status}: {reason}")]
    Api { status: i32, reason: String },

    #[error("Could not read the service response: {0}")]
    Response(String),
}

/// Remote text-generation collaborator.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, EnhanceError>;
}

static LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^```[a-z]*\n").expect("valid leading fence pattern")
});

static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n```$").expect("valid trailing fence pattern"));

/// Remove a markdown code fence wrapped around a model reply.
pub fn strip_code_fences(text: &str) -> String {
    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.trim().to_string()
}

fn enhance_prompt(code: &str, language: &str) -> String {
    format!(
        "You are an expert code formatter and educator.\n\
         Task: Refactor the following {language} code to be cleaner, more idiomatic, and easier to read for a presentation.\n\
         \n\
         Requirements:\n\
         1. Fix indentation and spacing.\n\
         2. Add brief, helpful comments for key logic (do not over-comment).\n\
         3. Keep variable names concise but descriptive.\n\
         4. RETURN ONLY THE RAW CODE STRING. Do not include markdown code fences (like ```) or any introductory text.\n\
         \n\
         Code:\n\
         {code}\n"
    )
}

fn explain_prompt(code: &str) -> String {
    format!(
        "Explain the following code in one short paragraph suitable for a slide speaker note.\n\
         Code:\n\
         {code}\n"
    )
}

/// Ask the model to tidy `code`. An empty reply keeps the original code.
pub fn enhance_code(
    generator: &dyn TextGenerator,
    code: &str,
    language: &str,
) -> Result<String, EnhanceError> {
    log::debug!("Requesting enhancement for {} bytes of {language}", code.len());
    let reply = generator.generate(&enhance_prompt(code, language))?;
    let text = if reply.trim().is_empty() { code } else { reply.as_str() };
    Ok(strip_code_fences(text))
}

/// One-paragraph explanation; failures yield an empty string.
pub fn explain_code(generator: &dyn TextGenerator, code: &str) -> String {
    match generator.generate(&explain_prompt(code)) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            log::warn!("Explanation request failed: {e}");
            String::new()
        }
    }
}

// --- Gemini REST client ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Blocking client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, EnhanceError> {
        let api_key = self.api_key.as_deref().ok_or(EnhanceError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = minreq::post(self.endpoint())
            .with_header("x-goog-api-key", api_key)
            .with_header("User-Agent", "CodeSnap")
            .with_timeout(self.timeout_secs)
            .with_json(&body)
            .map_err(|e| EnhanceError::Response(e.to_string()))?
            .send()
            .map_err(|e| EnhanceError::Network(e.to_string()))?;

        if !(200..300).contains(&response.status_code) {
            return Err(EnhanceError::Api {
                status: response.status_code,
                reason: response.reason_phrase.clone(),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| EnhanceError::Response(e.to_string()))?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned replies and records prompts.
    pub struct Scripted {
        pub replies: Mutex<Vec<Result<String, EnhanceError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        pub fn new(replies: Vec<Result<String, EnhanceError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for Scripted {
        fn generate(&self, prompt: &str) -> Result<String, EnhanceError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    /// Generator that always fails.
    pub struct Offline;

    impl TextGenerator for Offline {
        fn generate(&self, _prompt: &str) -> Result<String, EnhanceError> {
            Err(EnhanceError::Network("offline".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::Scripted;
    use super::*;

    #[test]
    fn test_strip_fenced_reply() {
        assert_eq!(strip_code_fences("```js\ncode\n```"), "code");
        assert_eq!(strip_code_fences("```\ncode\n```"), "code");
        assert_eq!(strip_code_fences("```Python\nx = 1\n```"), "x = 1");
    }

    #[test]
    fn test_strip_leaves_unfenced_code() {
        assert_eq!(strip_code_fences("  let a = 1;\n"), "let a = 1;");
        assert_eq!(strip_code_fences("a ``` b"), "a ``` b");
    }

    #[test]
    fn test_strip_only_removes_outer_fences() {
        let inner = "```js\nconst s = `x`;\n```\n```";
        assert_eq!(strip_code_fences(inner), "const s = `x`;\n```");
    }

    #[test]
    fn test_enhance_sends_language_and_code() {
        let generator = Scripted::new(vec![Ok("```js\nconst x = 1;\n```".to_string())]);
        let out = enhance_code(&generator, "var x=1", "javascript").unwrap();
        assert_eq!(out, "const x = 1;");

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("following javascript code"));
        assert!(prompts[0].contains("var x=1"));
    }

    #[test]
    fn test_enhance_empty_reply_keeps_code() {
        let generator = Scripted::new(vec![Ok("   ".to_string())]);
        assert_eq!(enhance_code(&generator, "x = 1", "python").unwrap(), "x = 1");
    }

    #[test]
    fn test_enhance_propagates_failure() {
        let generator = Scripted::new(vec![Err(EnhanceError::Network("offline".into()))]);
        assert!(matches!(
            enhance_code(&generator, "x", "bash"),
            Err(EnhanceError::Network(_))
        ));
    }

    #[test]
    fn test_explain_failure_is_empty() {
        let generator = Scripted::new(vec![Err(EnhanceError::MissingApiKey)]);
        assert_eq!(explain_code(&generator, "x"), "");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), "Hello world");

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"contents":[{"role":"user","parts":[{"text":"hi"}]}]}"#);
    }

    #[test]
    fn test_missing_key_fails_without_network() {
        let client = GeminiClient::from_config(&AppConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(client.generate("x"), Err(EnhanceError::MissingApiKey));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::from_config(&AppConfig {
            api_base_url: "https://example.test/v1beta/".to_string(),
            model: "gemini-2.5-flash".to_string(),
            ..Default::default()
        });
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
