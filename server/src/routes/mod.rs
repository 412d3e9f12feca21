use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use suggest::gemini::CompletionOutcome;
use suggest::{EditorContext, Suggestion, VocabularyEntry, tokenize};
use tracing::{debug, info, warn};

use crate::errors::{ApiError, ApiResult};
use crate::state::AppState;
use crate::telemetry::Telemetry;

const CACHE_PREFIX: &str = "autofill:";
const DICT_PREFIX: &str = "dict:";

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cursor: usize,
    #[serde(default)]
    pub context: Option<EditorContext>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Suggestion lookup: cache read-through keyed by the last typed token, with
/// the model call behind a miss.
pub async fn suggest_handler(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> ApiResult<Json<SuggestResponse>> {
    let before_cursor = tokenize::text_before_cursor(&request.text, request.cursor);
    let last_word = tokenize::last_word(before_cursor);

    // No trigger under the cursor: answer immediately, no cache or model call.
    if last_word.is_empty() {
        return Ok(Json(SuggestResponse {
            suggestions: Vec::new(),
        }));
    }

    let cache_key = format!("{CACHE_PREFIX}{}", last_word.to_lowercase());

    if let Some(cached) = state.cache.read(&cache_key).await {
        match serde_json::from_str::<Vec<Suggestion>>(&cached) {
            Ok(suggestions) => {
                Telemetry::record_cache_hit();
                debug!(%cache_key, "serving suggestions from cache");
                return Ok(Json(SuggestResponse { suggestions }));
            }
            Err(e) => {
                warn!(%cache_key, error = %e, "cache entry was not a suggestion array, regenerating");
            }
        }
    }
    Telemetry::record_cache_miss();

    let outcome = state
        .completer
        .complete(before_cursor, last_word, request.context.as_ref())
        .await;

    let suggestions = match outcome {
        CompletionOutcome::Suggestions(suggestions) => suggestions,
        CompletionOutcome::Degraded(reason) => {
            Telemetry::record_degraded(&reason.to_string());
            Vec::new()
        }
    };

    if !suggestions.is_empty() {
        let payload = serde_json::to_string(&suggestions)?;
        if let Err(e) = state
            .cache
            .write_with_expiry(&cache_key, &payload, state.cache_ttl_secs)
            .await
        {
            // A broken cache never costs the caller their suggestions.
            warn!(%cache_key, error = %e, "cache write failed, returning suggestions uncached");
        }
    }

    Ok(Json(SuggestResponse { suggestions }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub message: String,
}

/// Vocabulary feedback: persist the confirmed word and evict its suggestion
/// cache entry so the next lookup regenerates against the updated dictionary.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let word = request.word.trim();
    if word.is_empty() {
        return Err(ApiError::InvalidRequest("word is required".to_string()));
    }
    if !state.cache.is_configured() {
        return Err(ApiError::InvalidRequest(
            "no cache store is configured".to_string(),
        ));
    }

    let entry = VocabularyEntry {
        word: word.to_string(),
        category: request.category.clone(),
        added_at: Utc::now(),
    };
    let payload = serde_json::to_string(&entry)?;

    state.cache.write(&format!("{DICT_PREFIX}{word}"), &payload).await?;
    state
        .cache
        .delete(&format!("{CACHE_PREFIX}{}", word.to_lowercase()))
        .await?;

    Telemetry::record_word_learned();
    info!(word, "vocabulary entry learned");

    Ok(Json(ValidateResponse {
        success: true,
        message: format!("Learned \"{word}\""),
    }))
}

pub async fn index_handler() -> &'static str {
    "fashion autofill service is running"
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
