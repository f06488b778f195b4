use anyhow::{Context, anyhow};
use serde::Deserialize;

/// One delivered image from an `imageInference` task.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunwareImage {
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "positivePrompt")]
    pub positive_prompt: String,
    #[serde(default)]
    pub seed: i64,
    #[serde(rename = "NSFWContent", default)]
    pub nsfw_content: bool,
}

#[derive(Debug, Deserialize)]
struct RunwareResponse {
    #[serde(default)]
    data: Vec<RunwareImage>,
    #[serde(default)]
    errors: Vec<RunwareError>,
}

#[derive(Debug, Deserialize)]
struct RunwareError {
    message: String,
}

pub fn parse_image_inference(body: &[u8]) -> anyhow::Result<RunwareImage> {
    let resp: RunwareResponse = serde_json::from_slice(body).context("decode Runware JSON")?;

    if let Some(err) = resp.errors.first() {
        return Err(anyhow!("runware error: {}", err.message));
    }

    resp.data
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no image in inference response"))
}
