use errors::CompletionError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::keys::KeyRotator;
use crate::prompt;
use crate::types::{EditorContext, Suggestion};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Why a completion attempt produced no suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// The credential pool is empty; no model call was attempted.
    NoCredentials,
    /// Both the primary and the fallback model failed.
    UpstreamExhausted,
}

impl std::fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradedReason::NoCredentials => write!(f, "no_credentials"),
            DegradedReason::UpstreamExhausted => write!(f, "upstream_exhausted"),
        }
    }
}

/// Outcome of one completion request.
///
/// Degradation stays distinguishable from a genuine zero-result answer inside
/// the process; the HTTP layer maps every degraded outcome to an empty
/// suggestion list.
#[derive(Debug, PartialEq)]
pub enum CompletionOutcome {
    Suggestions(Vec<Suggestion>),
    Degraded(DegradedReason),
}

impl CompletionOutcome {
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            CompletionOutcome::Suggestions(suggestions) => suggestions,
            CompletionOutcome::Degraded(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini-backed completion requester with two-tier model fallback.
pub struct CompletionClient {
    client: Client,
    rotator: KeyRotator,
    api_base: String,
    primary_model: String,
    fallback_model: String,
}

impl CompletionClient {
    pub fn new(
        rotator: KeyRotator,
        api_base: impl Into<String>,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CompletionError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            rotator,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            primary_model: primary_model.into(),
            fallback_model: fallback_model.into(),
        })
    }

    /// Requests completions for `trigger` in the context of
    /// `text_before_cursor`. Never returns an error: an empty credential pool
    /// or a doubly failed upstream degrades to a reason the caller maps to an
    /// empty list.
    pub async fn complete(
        &self,
        text_before_cursor: &str,
        trigger: &str,
        context: Option<&EditorContext>,
    ) -> CompletionOutcome {
        let Some(credential) = self.rotator.next() else {
            warn!("no upstream credentials configured, returning zero suggestions");
            return CompletionOutcome::Degraded(DegradedReason::NoCredentials);
        };

        let instruction = prompt::build_instruction(text_before_cursor, trigger, context);

        match self
            .generate(&self.primary_model, &credential, &instruction)
            .await
        {
            Ok(suggestions) => CompletionOutcome::Suggestions(suggestions),
            Err(primary_err) => {
                warn!(
                    model = %self.primary_model,
                    error = %primary_err,
                    "primary model failed, retrying against fallback"
                );
                metrics::counter!("autofill_fallback_total").increment(1);

                match self
                    .generate(&self.fallback_model, &credential, &instruction)
                    .await
                {
                    Ok(suggestions) => CompletionOutcome::Suggestions(suggestions),
                    Err(fallback_err) => {
                        warn!(
                            model = %self.fallback_model,
                            error = %fallback_err,
                            "fallback model failed, completion exhausted"
                        );
                        CompletionOutcome::Degraded(DegradedReason::UpstreamExhausted)
                    }
                }
            }
        }
    }

    async fn generate(
        &self,
        model: &str,
        credential: &str,
        instruction: &str,
    ) -> Result<Vec<Suggestion>, CompletionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, model, credential
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: instruction.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: SAMPLING_TEMPERATURE,
            },
        };

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport {
                model: model.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::UpstreamStatus {
                model: model.to_string(),
                status,
                body,
            });
        }

        let response: GenerateContentResponse =
            resp.json()
                .await
                .map_err(|e| CompletionError::MalformedAnswer {
                    reason: e.to_string(),
                })?;

        let text = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(CompletionError::EmptyAnswer)?;

        parse_suggestion_array(&text)
    }
}

/// Strips the ```json / ``` fences some models wrap around their answer.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

fn parse_suggestion_array(raw: &str) -> Result<Vec<Suggestion>, CompletionError> {
    serde_json::from_str(strip_code_fences(raw)).map_err(|e| CompletionError::MalformedAnswer {
        reason: e.to_string(),
    })
}
