use crate::generator::GENERATOR_PROVIDER_DEMO;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub defaults: GlobalDefaults,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub api_key_present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDefaults {
    pub generator_provider: String,
    pub generator_model: String,
    pub generator_base_url: String,
    pub output_format: String,
    pub cfg_scale: f32,
    pub number_results: u32,
    pub extractor_model: String,
    pub uploads_enabled: bool,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            generator_provider: GENERATOR_PROVIDER_DEMO.into(),
            generator_model: "runware:100@1".into(),
            generator_base_url: "https://api.runware.ai".into(),
            output_format: "WEBP".into(),
            cfg_scale: 7.0,
            number_results: 1,
            extractor_model: "demo-ocr-v1".into(),
            uploads_enabled: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: GlobalDefaults::default(),
            api_key_present: false,
        }
    }
}
