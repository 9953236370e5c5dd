//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{NarrativeError, NarrativeKind, Narrator};
use crate::settings::NarrativeSettings;

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for narrative text.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini REST API
#[derive(Clone)]
pub struct GeminiNarrator {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiNarrator {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Build from settings. A key in settings wins over `GEMINI_API_KEY`,
    /// which wins over `API_KEY`.
    pub fn from_settings(settings: &NarrativeSettings) -> Self {
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("API_KEY").ok());
        Self::new(
            &settings.base_url,
            &settings.model,
            api_key,
            settings.timeout_secs,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Narrator for GeminiNarrator {
    async fn compose(&self, kind: &NarrativeKind) -> Result<String, NarrativeError> {
        let api_key = self.api_key.as_deref().ok_or(NarrativeError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: kind.prompt(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: kind.temperature(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NarrativeError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| NarrativeError::RequestFailed(e.to_string()))?;
            return Err(NarrativeError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::InvalidResponse(e.to_string()))?;

        extract_text(body)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String, NarrativeError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| NarrativeError::InvalidResponse("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }
    Ok(text.trim().to_string())
}

// =============================================================================
// Gemini API types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::FailureReason;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_joins_parts() {
        let body = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"YOU ARE FIRED! "},{"text":"Out.\n"}],"role":"model"}}]}"#,
        );
        assert_eq!(extract_text(body).unwrap(), "YOU ARE FIRED! Out.");
    }

    #[test]
    fn test_extract_rejects_empty() {
        assert!(matches!(
            extract_text(parse(r#"{"candidates":[]}"#)),
            Err(NarrativeError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_text(parse(r#"{}"#)),
            Err(NarrativeError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_text(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)),
            Err(NarrativeError::EmptyResponse)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let kind = NarrativeKind::Termination {
            level: 2,
            score: 300,
            reason: FailureReason::WrongOrder,
        };
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: kind.prompt() }],
            }],
            generation_config: GenerationConfig {
                temperature: kind.temperature(),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["generationConfig"]["temperature"].as_f64().is_some());
        assert!(
            json["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("wrong burger")
        );
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let narrator = GeminiNarrator::new("http://localhost:9000/", "m", None, 5);
        assert_eq!(narrator.endpoint(), "http://localhost:9000/models/m:generateContent");
        assert!(!narrator.has_api_key());
    }

    #[tokio::test]
    async fn test_missing_key_fails_fast() {
        let narrator = GeminiNarrator::new(DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, Some(" ".into()), 5);
        let kind = NarrativeKind::Promotion { level: 1, bonus: 300 };
        assert!(matches!(
            narrator.compose(&kind).await,
            Err(NarrativeError::MissingApiKey)
        ));
    }
}
