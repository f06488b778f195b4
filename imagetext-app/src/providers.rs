//! Glue between the engine's provider traits and the provider modules.

use async_trait::async_trait;
use imagetext_core::config::AppConfig;
use imagetext_core::generator::is_runware_selected;
use imagetext_core::types::ImageSource;
use imagetext_engine::engine::{EngineConfig, ImagetextEngine};
use imagetext_engine::traits::{ExtractedText, GeneratedImage, ImageGenerator, TextExtractor};
use imagetext_providers::demo::DEFAULT_GENERATION_DELAY;
use imagetext_providers::runware::{GenerateImageParams, RunwareConfig};
use std::sync::Arc;
use std::time::Duration;

/// The canned OCR provider. The staged schedule already supplies the
/// perceived latency, so the provider itself answers immediately by default.
pub struct DemoExtractor {
    pub delay: Duration,
}

impl Default for DemoExtractor {
    fn default() -> Self {
        Self { delay: Duration::ZERO }
    }
}

#[async_trait]
impl TextExtractor for DemoExtractor {
    async fn extract(&self, source: &ImageSource, model: &str) -> anyhow::Result<ExtractedText> {
        let text = imagetext_providers::demo::extract_text(source, self.delay).await;
        Ok(ExtractedText {
            text,
            provider: "demo".into(),
            model: model.into(),
        })
    }
}

/// The mocked generation service: a stock photo URL after a fixed delay.
pub struct DemoGenerator {
    pub delay: Duration,
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self {
            delay: DEFAULT_GENERATION_DELAY,
        }
    }
}

#[async_trait]
impl ImageGenerator for DemoGenerator {
    async fn generate(
        &self,
        _base_url: &str,
        _api_key: &str,
        _model: &str,
        prompt: &str,
    ) -> anyhow::Result<GeneratedImage> {
        let image = imagetext_providers::demo::generate_image(prompt, self.delay).await;
        Ok(GeneratedImage {
            image_url: image.image_url,
            positive_prompt: image.positive_prompt,
            seed: image.seed as i64,
            nsfw_content: false,
        })
    }
}

/// HTTP-backed generation against the Runware task endpoint.
pub struct RunwareGenerator;

#[async_trait]
impl ImageGenerator for RunwareGenerator {
    async fn generate(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> anyhow::Result<GeneratedImage> {
        let cfg = RunwareConfig::new(base_url, api_key, model)?;
        let params = GenerateImageParams::from_prompt(prompt);

        let req = imagetext_providers::runware::build_image_inference_request(&cfg, &params);
        let resp = imagetext_providers::runtime::execute(&req).await?;
        if !(200..=299).contains(&resp.status) {
            return Err(anyhow::anyhow!("bad status {}", resp.status));
        }

        let image = imagetext_providers::parse::parse_image_inference(&resp.body)?;
        Ok(GeneratedImage {
            image_url: image.image_url,
            positive_prompt: image.positive_prompt,
            seed: image.seed,
            nsfw_content: image.nsfw_content,
        })
    }
}

/// Assembles an engine from the stored config: canned extraction always, and
/// either the demo or the Runware generator depending on the selection.
pub fn build_engine_from_config(cfg: &AppConfig, api_key: String) -> ImagetextEngine {
    let generator: Arc<dyn ImageGenerator> =
        if is_runware_selected(&cfg.defaults.generator_provider) {
            Arc::new(RunwareGenerator)
        } else {
            Arc::new(DemoGenerator::default())
        };

    ImagetextEngine::new(
        EngineConfig {
            defaults: cfg.defaults.clone(),
            api_key,
        },
        Arc::new(DemoExtractor::default()),
        generator,
    )
}
