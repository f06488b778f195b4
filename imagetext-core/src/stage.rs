use std::time::Duration;
use thiserror::Error;

/// One named step of the simulated pipeline: the label shown over the
/// progress bar, the bar position after the step, and how long the step
/// takes to "run".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub label: String,
    pub progress: u8,
    pub delay: Duration,
}

impl StageSpec {
    pub fn new(label: impl Into<String>, progress: u8, delay: Duration) -> Self {
        Self {
            label: label.into(),
            progress,
            delay,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StagePlanError {
    #[error("stage plan has no stages")]
    Empty,
    #[error("stage {index} does not advance progress ({prev} -> {next})")]
    NonMonotonic { index: usize, prev: u8, next: u8 },
    #[error("final stage ends at {last}%, expected 100%")]
    IncompleteProgress { last: u8 },
}

/// An ordered schedule of stages. The engine walks it front to back,
/// sleeping each stage's delay before announcing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    stages: Vec<StageSpec>,
}

impl StagePlan {
    pub fn new(stages: Vec<StageSpec>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn total_delay(&self) -> Duration {
        self.stages.iter().map(|s| s.delay).sum()
    }

    pub fn validate(&self) -> Result<(), StagePlanError> {
        if self.stages.is_empty() {
            return Err(StagePlanError::Empty);
        }

        let mut prev: Option<u8> = None;
        for (index, stage) in self.stages.iter().enumerate() {
            if let Some(p) = prev {
                if stage.progress <= p {
                    return Err(StagePlanError::NonMonotonic {
                        index,
                        prev: p,
                        next: stage.progress,
                    });
                }
            }
            prev = Some(stage.progress);
        }

        let last = prev.unwrap_or(0);
        if last != 100 {
            return Err(StagePlanError::IncompleteProgress { last });
        }

        Ok(())
    }
}

// The hero demo ticks through five stages at 800ms each.
pub const EXTRACTION_STAGE_TICK: Duration = Duration::from_millis(800);

// The generation demo announces a stage every second.
pub const GENERATION_STAGE_TICK: Duration = Duration::from_secs(1);

pub fn default_extraction_plan() -> StagePlan {
    StagePlan::new(vec![
        StageSpec::new("Analyzing image...", 20, EXTRACTION_STAGE_TICK),
        StageSpec::new("Detecting text regions...", 40, EXTRACTION_STAGE_TICK),
        StageSpec::new("Recognizing characters...", 60, EXTRACTION_STAGE_TICK),
        StageSpec::new("Enhancing text...", 80, EXTRACTION_STAGE_TICK),
        StageSpec::new("Finalizing results...", 100, EXTRACTION_STAGE_TICK),
    ])
}

pub fn default_generation_plan() -> StagePlan {
    StagePlan::new(vec![
        StageSpec::new("Analyzing prompt...", 20, GENERATION_STAGE_TICK),
        StageSpec::new("Composing scene...", 40, GENERATION_STAGE_TICK),
        StageSpec::new("Rendering image...", 60, GENERATION_STAGE_TICK),
        StageSpec::new("Applying AI enhancements...", 80, GENERATION_STAGE_TICK),
        StageSpec::new("Finalizing results...", 100, GENERATION_STAGE_TICK),
    ])
}
