use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completion candidate, produced verbatim by the upstream model.
///
/// Fields default to empty strings: a partially shaped object from the model
/// still passes through, matching the contract of "JSON parse success is the
/// only validation".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub insert_text: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub trigger: String,
}

/// Optional per-request editor context attached to a suggestion lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorContext {
    pub season: Option<String>,
}

/// A word the designer confirmed, stored permanently under `dict:<word>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    pub category: String,
    pub added_at: DateTime<Utc>,
}
