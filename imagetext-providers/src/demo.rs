//! Canned providers for the offline demo.
//!
//! These stand in for the real OCR and generation backends: they wait a
//! configurable delay and return stock responses, which is exactly what the
//! product demo ships with.

use imagetext_core::samples::{FALLBACK_EXTRACTION_TEXT, GENERIC_UPLOAD_TEXT, find_sample};
use imagetext_core::text::prompt_query;
use imagetext_core::types::ImageSource;
use std::time::Duration;
use uuid::Uuid;

// The mocked generation service answers after two seconds.
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoImage {
    pub image_url: String,
    pub positive_prompt: String,
    pub seed: u32,
}

/// Returns the canned extraction text for `source` after `delay`.
pub async fn extract_text(source: &ImageSource, delay: Duration) -> String {
    tokio::time::sleep(delay).await;

    match source {
        ImageSource::Sample { name, .. } => match find_sample(name) {
            Some(sample) => imagetext_core::samples::canned_extraction_text(sample.name)
                .unwrap_or(FALLBACK_EXTRACTION_TEXT)
                .to_string(),
            None => FALLBACK_EXTRACTION_TEXT.to_string(),
        },
        ImageSource::Url(_) | ImageSource::Upload { .. } => GENERIC_UPLOAD_TEXT.to_string(),
    }
}

/// Returns a stock photo keyed to the prompt after `delay`.
pub async fn generate_image(prompt: &str, delay: Duration) -> DemoImage {
    tokio::time::sleep(delay).await;

    let query = prompt_query(prompt);
    DemoImage {
        image_url: format!("https://source.unsplash.com/random/1024x1024/?{query}"),
        positive_prompt: prompt.to_string(),
        seed: demo_seed(),
    }
}

fn demo_seed() -> u32 {
    // Pseudo-random seed, six digits max like the real service returns.
    let id = Uuid::new_v4();
    let b = id.as_bytes();
    u32::from_le_bytes([b[0], b[1], b[2], b[3]]) % 1_000_000
}
