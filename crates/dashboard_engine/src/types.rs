use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type SimulationId = u64;

/// Article id as the backend sends it: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(number) => write!(f, "{number}"),
            WireId::Text(text) => f.write_str(text),
        }
    }
}

/// One entry of the `articles` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleRecord {
    pub id: WireId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub rewrite_status: Option<String>,
    #[serde(default)]
    pub selected_for_rewrite: Option<bool>,
}

impl ArticleRecord {
    /// Textual id, also used as the URL path segment.
    pub fn article_id(&self) -> String {
        self.id.to_string()
    }

    /// Content is absent, `null` or empty.
    pub fn is_missing_content(&self) -> bool {
        self.content.as_deref().map_or(true, str::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAck {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackfillSummary {
    pub attempted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ArticlesLoaded(Result<Vec<ArticleRecord>, ApiError>),
    SelectCompleted {
        article_id: String,
        result: Result<SelectAck, ApiError>,
    },
    ContentUpdated {
        article_id: String,
        content: String,
        result: Result<(), ApiError>,
    },
    BackfillCompleted(Result<BackfillSummary, ApiError>),
    ProgressTick {
        simulation: SimulationId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedPayload, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedPayload,
    /// Backend answered with an `error` field instead of an acknowledgement.
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}
