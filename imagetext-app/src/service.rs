use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use imagetext_core::config::AppConfig;
use imagetext_core::stage::{default_extraction_plan, default_generation_plan};
use imagetext_core::types::{ImageSource, ProcessingKind, UploadId};
use imagetext_runtime::config_store::ConfigStore;
use imagetext_runtime::uploads::{UploadEntry, UploadStore};

use crate::controller::{SessionController, StartOutcome};
use crate::providers::build_engine_from_config;

/// The facade the demo frontends drive: config, uploads, and the session
/// controller, wired together from the stored configuration.
#[derive(Clone)]
pub struct AppService {
    config_store: ConfigStore,
    uploads: UploadStore,
    controller: SessionController,
    uploads_enabled: bool,
}

impl AppService {
    pub fn new(config_path: PathBuf, uploads_path: PathBuf, api_key: String) -> anyhow::Result<Self> {
        let config_store = ConfigStore::at_path(config_path);
        let cfg = config_store.load_or_default()?;

        let engine = build_engine_from_config(&cfg, api_key);
        let controller = SessionController::new(Arc::new(engine));

        Ok(Self {
            config_store,
            uploads: UploadStore::at_path(uploads_path),
            uploads_enabled: cfg.defaults.uploads_enabled,
            controller,
        })
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        self.config_store.load_or_default()
    }

    pub fn save_config(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        self.config_store.save(cfg)
    }

    /// Starts an extraction session with the default schedule and, when the
    /// session was accepted, records the image in the uploads list.
    pub async fn start_extraction(&self, source: ImageSource) -> anyhow::Result<StartOutcome> {
        let outcome = self
            .controller
            .start_extraction(source.clone(), default_extraction_plan())
            .await;

        if outcome == StartOutcome::Started && self.uploads_enabled {
            self.record_upload(&source, ProcessingKind::TextExtraction)?;
        }

        Ok(outcome)
    }

    pub async fn start_generation(&self, prompt: &str) -> StartOutcome {
        self.controller
            .start_generation(prompt, default_generation_plan())
            .await
    }

    pub fn recent_uploads(&self) -> anyhow::Result<Vec<UploadEntry>> {
        self.uploads.load()
    }

    pub fn remove_upload(&self, id: &UploadId) -> anyhow::Result<()> {
        self.uploads.remove(id)
    }

    pub fn clear_uploads(&self) -> anyhow::Result<()> {
        self.uploads.clear()
    }

    fn record_upload(&self, source: &ImageSource, kind: ProcessingKind) -> anyhow::Result<()> {
        let url = match source {
            ImageSource::Sample { url, .. } => url.clone(),
            ImageSource::Url(url) => url.clone(),
            // Uploaded pixel data is never persisted by the demo.
            ImageSource::Upload { .. } => String::new(),
        };

        self.uploads.append(UploadEntry {
            id: UploadId::new(),
            url,
            name: source.display_name().to_string(),
            ts_unix_ms: now_unix_ms(),
            kind,
        })
    }
}

fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagetext_core::samples::SAMPLE_BOOK_PAGE;

    fn service(dir: &std::path::Path) -> AppService {
        AppService::new(
            dir.join("config.json"),
            dir.join("uploads.json"),
            String::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn accepted_extraction_is_recorded_in_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let source = ImageSource::sample(SAMPLE_BOOK_PAGE, "https://example.com/book.jpg");
        let outcome = svc.start_extraction(source).await.unwrap();
        assert_eq!(outcome, StartOutcome::Started);

        let uploads = svc.recent_uploads().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].name, SAMPLE_BOOK_PAGE);
        assert_eq!(uploads[0].kind, ProcessingKind::TextExtraction);

        // Don't leave the session running into test teardown.
        svc.controller().cancel().await;
    }

    #[tokio::test]
    async fn rejected_extraction_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let outcome = svc
            .start_extraction(ImageSource::Url("  ".into()))
            .await
            .unwrap();
        assert_eq!(outcome, StartOutcome::Rejected);
        assert!(svc.recent_uploads().unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_run_uses_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());

        let cfg = svc.load_config().unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
