use crate::traits::{ExtractedText, GeneratedImage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Extraction,
    Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionOutcome {
    ExtractedText(ExtractedText),
    GeneratedImage(GeneratedImage),
}

impl SessionOutcome {
    /// A short string for logs and the uploads list.
    pub fn summary(&self) -> &str {
        match self {
            Self::ExtractedText(t) => &t.text,
            Self::GeneratedImage(g) => &g.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionTimings {
    pub schedule_ms: Option<u64>,
    pub provider_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub outcome: Option<SessionOutcome>,
    pub timings: SessionTimings,
    pub error: Option<String>,
}

impl SessionResult {
    pub fn complete(kind: SessionKind, outcome: SessionOutcome) -> Self {
        Self {
            kind,
            status: SessionStatus::Complete,
            outcome: Some(outcome),
            timings: SessionTimings::default(),
            error: None,
        }
    }

    pub fn failed(kind: SessionKind, error: impl Into<String>) -> Self {
        Self {
            kind,
            status: SessionStatus::Failed,
            outcome: None,
            timings: SessionTimings::default(),
            error: Some(error.into()),
        }
    }
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
