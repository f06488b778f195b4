use crate::request::{Body, HttpRequest};
use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunwareConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl RunwareConfig {
    /// Validates the endpoint up front so a typo'd base URL fails at
    /// configuration time instead of mid-session.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).with_context(|| format!("invalid base url: {base_url}"))?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

/// Image inference parameters, mirroring what the product demo exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateImageParams {
    pub positive_prompt: String,
    pub number_results: Option<u32>,
    pub output_format: Option<String>,
    pub cfg_scale: Option<f32>,
    pub scheduler: Option<String>,
    pub strength: Option<f32>,
    pub seed: Option<i64>,
}

impl GenerateImageParams {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            positive_prompt: prompt.into(),
            number_results: None,
            output_format: None,
            cfg_scale: None,
            scheduler: None,
            strength: None,
            seed: None,
        }
    }
}

pub fn build_image_inference_request(
    cfg: &RunwareConfig,
    params: &GenerateImageParams,
) -> HttpRequest {
    let url = join_url(&cfg.base_url, "/v1");

    // The endpoint takes an array of tasks; we only ever submit one.
    let mut task = json!({
        "taskType": "imageInference",
        "taskUUID": Uuid::new_v4().to_string(),
        "positivePrompt": params.positive_prompt,
        "model": cfg.model,
        "width": 1024,
        "height": 1024,
        "numberResults": params.number_results.unwrap_or(1),
        "outputFormat": params.output_format.as_deref().unwrap_or("WEBP"),
        "CFGScale": params.cfg_scale.unwrap_or(7.0),
    });

    if let Some(obj) = task.as_object_mut() {
        if let Some(scheduler) = &params.scheduler {
            obj.insert("scheduler".into(), json!(scheduler));
        }
        if let Some(strength) = params.strength {
            obj.insert("strength".into(), json!(strength));
        }
        if let Some(seed) = params.seed {
            obj.insert("seed".into(), json!(seed));
        }
    }

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Authorization".into(), format!("Bearer {}", cfg.api_key)),
        ],
        body: Body::Json(json!([task]).to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
