use async_trait::async_trait;
use imagetext_core::types::ImageSource;
use serde::{Deserialize, Serialize};

/// A stage announcement passed to the session hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageUpdate {
    pub label: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_url: String,
    pub positive_prompt: String,
    pub seed: i64,
    pub nsfw_content: bool,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, source: &ImageSource, model: &str) -> anyhow::Result<ExtractedText>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> anyhow::Result<GeneratedImage>;
}
