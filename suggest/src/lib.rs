//! # Suggestion Core
//!
//! Credential rotation, trigger tokenization, and the Gemini-backed
//! completion requester for the fashion-editor autofill service.

pub mod gemini;
pub mod keys;
pub mod prompt;
pub mod tokenize;
pub mod types;

pub use gemini::{CompletionClient, CompletionOutcome, DegradedReason};
pub use keys::KeyRotator;
pub use types::{EditorContext, Suggestion, VocabularyEntry};
