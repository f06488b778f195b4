use crate::session::{SessionKind, SessionOutcome, SessionResult, ms};
use crate::traits::{ImageGenerator, StageUpdate, TextExtractor};
use imagetext_core::config::GlobalDefaults;
use imagetext_core::generator::accept_extracted_text;
use imagetext_core::stage::{StagePlan, StagePlanError};
use imagetext_core::text::normalize_extracted_text;
use imagetext_core::types::ImageSource;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no image selected")]
    NoImageSelected,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error(transparent)]
    InvalidPlan(#[from] StagePlanError),
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub defaults: GlobalDefaults,

    // Generator auth is currently global.
    pub api_key: String,
}

pub struct ImagetextEngine {
    cfg: EngineConfig,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn ImageGenerator>,
}

impl ImagetextEngine {
    pub fn new(
        cfg: EngineConfig,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            cfg,
            extractor,
            generator,
        }
    }

    /// Runs the staged extraction pipeline (schedule -> provider -> result).
    pub async fn run_extraction(
        &self,
        source: ImageSource,
        plan: &StagePlan,
    ) -> anyhow::Result<SessionResult> {
        self.run_extraction_with_hook(source, plan, |_stage| async {})
            .await
    }

    /// Same as `run_extraction`, but announces each stage as the schedule
    /// advances.
    ///
    /// The hook is intended for UI progress rendering and must be fast. A
    /// stage fires only after its delay has fully elapsed, so a caller that
    /// aborts this future mid-schedule sees no further announcements.
    pub async fn run_extraction_with_hook<F, Fut>(
        &self,
        source: ImageSource,
        plan: &StagePlan,
        on_stage: F,
    ) -> anyhow::Result<SessionResult>
    where
        F: Fn(StageUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        if source.is_empty() {
            return Err(EngineError::NoImageSelected.into());
        }

        let mut result = self.walk_schedule(SessionKind::Extraction, plan, &on_stage).await?;

        let t0 = Instant::now();
        let extracted = match self
            .extractor
            .extract(&source, &self.cfg.defaults.extractor_model)
            .await
        {
            Ok(e) => e,
            Err(e) => {
                let mut failed = SessionResult::failed(SessionKind::Extraction, e.to_string());
                failed.timings = result.timings;
                return Ok(failed);
            }
        };
        result.timings.provider_ms = Some(ms(t0.elapsed()));

        let normalized = normalize_extracted_text(&extracted.text);
        let Some(text) = accept_extracted_text(normalized) else {
            let mut failed =
                SessionResult::failed(SessionKind::Extraction, "provider returned no text");
            failed.timings = result.timings;
            return Ok(failed);
        };

        result.outcome = Some(SessionOutcome::ExtractedText(crate::traits::ExtractedText {
            text,
            ..extracted
        }));
        Ok(result)
    }

    pub async fn run_generation(
        &self,
        prompt: &str,
        plan: &StagePlan,
    ) -> anyhow::Result<SessionResult> {
        self.run_generation_with_hook(prompt, plan, |_stage| async {})
            .await
    }

    pub async fn run_generation_with_hook<F, Fut>(
        &self,
        prompt: &str,
        plan: &StagePlan,
        on_stage: F,
    ) -> anyhow::Result<SessionResult>
    where
        F: Fn(StageUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        if prompt.trim().is_empty() {
            return Err(EngineError::EmptyPrompt.into());
        }

        let mut result = self.walk_schedule(SessionKind::Generation, plan, &on_stage).await?;

        let t0 = Instant::now();
        let image = match self
            .generator
            .generate(
                &self.cfg.defaults.generator_base_url,
                &self.cfg.api_key,
                &self.cfg.defaults.generator_model,
                prompt.trim(),
            )
            .await
        {
            Ok(i) => i,
            Err(e) => {
                let mut failed = SessionResult::failed(SessionKind::Generation, e.to_string());
                failed.timings = result.timings;
                return Ok(failed);
            }
        };
        result.timings.provider_ms = Some(ms(t0.elapsed()));

        result.outcome = Some(SessionOutcome::GeneratedImage(image));
        Ok(result)
    }

    /// Walks the stage schedule: sleep each stage's delay, then announce it.
    ///
    /// Returns a Complete result shell with no outcome yet; the caller fills
    /// it in after the provider call.
    async fn walk_schedule<F, Fut>(
        &self,
        kind: SessionKind,
        plan: &StagePlan,
        on_stage: &F,
    ) -> anyhow::Result<SessionResult>
    where
        F: Fn(StageUpdate) -> Fut,
        Fut: Future<Output = ()>,
    {
        plan.validate().map_err(EngineError::InvalidPlan)?;

        let t0 = Instant::now();
        for stage in plan.stages() {
            tokio::time::sleep(stage.delay).await;
            on_stage(StageUpdate {
                label: stage.label.clone(),
                progress: stage.progress,
            })
            .await;
        }

        let mut result = SessionResult {
            kind,
            status: crate::session::SessionStatus::Complete,
            outcome: None,
            timings: crate::session::SessionTimings::default(),
            error: None,
        };
        result.timings.schedule_ms = Some(ms(t0.elapsed()));
        Ok(result)
    }
}
