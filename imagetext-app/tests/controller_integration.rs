use std::sync::Arc;
use std::time::Duration;

use imagetext_app::controller::{SessionController, SessionEvent, SessionStatus, StartOutcome};
use imagetext_app::providers::{DemoExtractor, DemoGenerator};
use imagetext_core::config::GlobalDefaults;
use imagetext_core::samples::SAMPLE_HANDWRITTEN_NOTE;
use imagetext_core::stage::{StagePlan, StageSpec};
use imagetext_core::types::ImageSource;
use imagetext_engine::engine::{EngineConfig, ImagetextEngine};
use imagetext_engine::session::SessionOutcome;
use tokio::sync::broadcast;
use tokio::time::timeout;

fn controller() -> SessionController {
    let engine = ImagetextEngine::new(
        EngineConfig {
            defaults: GlobalDefaults::default(),
            api_key: String::new(),
        },
        Arc::new(DemoExtractor {
            delay: Duration::ZERO,
        }),
        Arc::new(DemoGenerator {
            delay: Duration::ZERO,
        }),
    );
    SessionController::new(Arc::new(engine))
}

fn plan(stage_ms: u64, labels: &[(&str, u8)]) -> StagePlan {
    StagePlan::new(
        labels
            .iter()
            .map(|(label, progress)| {
                StageSpec::new(*label, *progress, Duration::from_millis(stage_ms))
            })
            .collect(),
    )
}

fn note_source() -> ImageSource {
    ImageSource::sample(SAMPLE_HANDWRITTEN_NOTE, "https://example.com/note.jpg")
}

async fn next_event(rx: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

#[tokio::test]
async fn n_stages_produce_exactly_n_ordered_notifications() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let labels = [
        ("Analyzing image...", 20u8),
        ("Detecting text regions...", 40),
        ("Recognizing characters...", 60),
        ("Enhancing text...", 80),
        ("Finalizing results...", 100),
    ];
    let outcome = controller
        .start_extraction(note_source(), plan(5, &labels))
        .await;
    assert_eq!(outcome, StartOutcome::Started);

    let mut seen = vec![];
    loop {
        match next_event(&mut rx).await {
            SessionEvent::Stage { label, progress } => seen.push((label, progress)),
            SessionEvent::Completed(_) => break,
            other => panic!("unexpected event: {other:?}"),
        }
    }

    assert_eq!(seen.len(), labels.len());
    for (got, want) in seen.iter().zip(labels.iter()) {
        assert_eq!(got.0, want.0);
        assert_eq!(got.1, want.1);
    }
}

#[tokio::test]
async fn cancel_before_completion_silences_the_session() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let outcome = controller
        .start_extraction(
            note_source(),
            plan(200, &[("Analyzing", 20), ("Recognizing", 60), ("Finalizing", 100)]),
        )
        .await;
    assert_eq!(outcome, StartOutcome::Started);

    // Cancel while the first stage delay is still pending.
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.cancel().await;

    assert!(matches!(next_event(&mut rx).await, SessionEvent::Cancelled));
    assert_eq!(controller.status().await.status, SessionStatus::Cancelled);

    // Nothing further may fire, even after all original delays have elapsed.
    let silence = timeout(Duration::from_millis(800), rx.recv()).await;
    assert!(silence.is_err(), "got event after cancel: {silence:?}");
}

#[tokio::test]
async fn cancel_when_not_running_is_a_no_op() {
    let controller = controller();
    let mut rx = controller.subscribe();

    controller.cancel().await;
    controller.cancel().await;

    assert_eq!(controller.status().await.status, SessionStatus::Idle);
    assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
}

#[tokio::test]
async fn start_while_running_is_a_no_op() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let three = plan(50, &[("Analyzing", 20), ("Recognizing", 60), ("Finalizing", 100)]);
    assert_eq!(
        controller
            .start_extraction(note_source(), three.clone())
            .await,
        StartOutcome::Started
    );
    assert_eq!(
        controller.start_extraction(note_source(), three).await,
        StartOutcome::Busy
    );

    // Only one session's worth of events arrives.
    let mut stages = 0;
    let mut completions = 0;
    loop {
        match next_event(&mut rx).await {
            SessionEvent::Stage { .. } => stages += 1,
            SessionEvent::Completed(_) => {
                completions += 1;
                break;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(stages, 3);
    assert_eq!(completions, 1);
    assert!(timeout(Duration::from_millis(300), rx.recv()).await.is_err());
}

#[tokio::test]
async fn full_schedule_completes_with_exactly_one_result() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let outcome = controller
        .start_extraction(
            note_source(),
            plan(10, &[("Analyzing", 20), ("Recognizing", 60), ("Finalizing", 100)]),
        )
        .await;
    assert_eq!(outcome, StartOutcome::Started);

    let mut results = vec![];
    loop {
        match next_event(&mut rx).await {
            SessionEvent::Stage { .. } => {}
            SessionEvent::Completed(result) => {
                results.push(result);
                break;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    assert_eq!(results.len(), 1);
    let SessionOutcome::ExtractedText(extracted) = &results[0] else {
        panic!("expected extracted text");
    };
    assert!(extracted.text.starts_with("Dear Sarah,"));

    let status = controller.status().await;
    assert_eq!(status.status, SessionStatus::Complete);
    assert!(status.last_result_available);
}

#[tokio::test]
async fn reset_after_complete_returns_to_idle_and_clears_the_result() {
    let controller = controller();
    let mut rx = controller.subscribe();

    controller
        .start_extraction(note_source(), plan(5, &[("Analyzing", 50), ("Finalizing", 100)]))
        .await;
    loop {
        if matches!(next_event(&mut rx).await, SessionEvent::Completed(_)) {
            break;
        }
    }

    controller.reset().await;

    let status = controller.status().await;
    assert_eq!(status.status, SessionStatus::Idle);
    assert!(!status.last_result_available);
    assert!(status.last_result_preview.is_none());
    assert!(status.error.is_none());
}

#[tokio::test]
async fn generation_session_delivers_a_stock_image() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let outcome = controller
        .start_generation(
            "A magical forest",
            plan(5, &[("Rendering image...", 50), ("Finalizing results...", 100)]),
        )
        .await;
    assert_eq!(outcome, StartOutcome::Started);

    loop {
        match next_event(&mut rx).await {
            SessionEvent::Stage { .. } => {}
            SessionEvent::Completed(SessionOutcome::GeneratedImage(image)) => {
                assert!(image.image_url.contains("source.unsplash.com"));
                assert_eq!(image.positive_prompt, "A magical forest");
                break;
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

#[tokio::test]
async fn missing_input_is_reported_and_leaves_the_surface_ready() {
    let controller = controller();
    let mut rx = controller.subscribe();

    let outcome = controller
        .start_extraction(ImageSource::Url(String::new()), plan(5, &[("Analyzing", 100)]))
        .await;
    assert_eq!(outcome, StartOutcome::Rejected);

    let SessionEvent::Failed(msg) = next_event(&mut rx).await else {
        panic!("expected failure event");
    };
    assert_eq!(msg, "No image selected.");

    let status = controller.status().await;
    assert_eq!(status.status, SessionStatus::Idle);
    assert_eq!(status.error.as_deref(), Some("No image selected."));

    // The surface can start a fresh session right away.
    assert_eq!(
        controller
            .start_extraction(note_source(), plan(5, &[("Analyzing", 100)]))
            .await,
        StartOutcome::Started
    );
}
