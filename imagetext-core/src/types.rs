use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadId(pub Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a session did with an image, as shown in the recent-uploads list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingKind {
    TextExtraction,
    AiCaption,
    ImageGeneration,
}

/// The image a session operates on.
///
/// Samples are the curated demo images; uploads carry only a display name
/// because the demo never persists pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    Sample { name: String, url: String },
    Url(String),
    Upload { name: String },
}

impl ImageSource {
    pub fn sample(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Sample {
            name: name.into(),
            url: url.into(),
        }
    }

    /// A short human-readable identifier for logs and the uploads list.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Sample { name, .. } => name,
            Self::Url(url) => url,
            Self::Upload { name } => name,
        }
    }

    /// True when there is nothing to process (empty selection).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Sample { name, url } => name.trim().is_empty() && url.trim().is_empty(),
            Self::Url(url) => url.trim().is_empty(),
            Self::Upload { name } => name.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_are_detected() {
        assert!(ImageSource::Url("   ".into()).is_empty());
        assert!(ImageSource::sample("", "").is_empty());
        assert!(!ImageSource::sample("Book Page", "https://example.com/a.jpg").is_empty());
    }
}
