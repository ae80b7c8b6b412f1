//! External reasoning capability
//!
//! The engine treats the model behind [`Reasoner`] as opaque: it sends a
//! prompt kind plus a text payload and gets free text back. Responses are
//! classified into [`ReasonerResponse::Structured`] when a JSON object can be
//! recovered from the text, and [`ReasonerResponse::Unstructured`] otherwise.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ExternalError;
use crate::extractors::extract_json_object;

/// What the payload asks the reasoner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    ClauseAnalysis,
    DocumentSummary,
}

#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Ask the external model; returns its raw text answer
    async fn reason(&self, kind: PromptKind, payload: &str) -> Result<String, ExternalError>;
}

/// Reasoner used when no external model is configured; every call is over quota
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineReasoner;

#[async_trait]
impl Reasoner for OfflineReasoner {
    async fn reason(&self, _kind: PromptKind, _payload: &str) -> Result<String, ExternalError> {
        Err(ExternalError::QuotaExceeded)
    }
}

/// Reasoner output after best-effort structure recovery
#[derive(Debug, Clone, PartialEq)]
pub enum ReasonerResponse {
    Structured(Map<String, Value>),
    Unstructured(String),
}

impl ReasonerResponse {
    pub fn parse(raw: &str) -> Self {
        extract_json_object(raw)
            .and_then(|object| serde_json::from_str::<Map<String, Value>>(object).ok())
            .map(ReasonerResponse::Structured)
            .unwrap_or_else(|| ReasonerResponse::Unstructured(raw.to_string()))
    }

    /// First string field among `keys`
    pub fn string_field(&self, keys: &[&str]) -> Option<String> {
        let ReasonerResponse::Structured(fields) = self else {
            return None;
        };
        keys.iter()
            .filter_map(|key| fields.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// First string-array field among `keys`; non-string items are skipped
    pub fn string_list_field(&self, keys: &[&str]) -> Option<Vec<String>> {
        let ReasonerResponse::Structured(fields) = self else {
            return None;
        };
        keys.iter()
            .filter_map(|key| fields.get(*key))
            .find_map(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
    }
}

/// Truncate to at most `max_chars` characters on a char boundary, marking the cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", text[..byte_idx].trim_end()),
        None => text.to_string(),
    }
}
