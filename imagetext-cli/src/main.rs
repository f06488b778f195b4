use imagetext_app::controller::{SessionEvent, StartOutcome};
use imagetext_app::service::AppService;
use imagetext_core::samples::{SAMPLE_HANDWRITTEN_NOTE, find_sample, sample_images, sample_prompts};
use imagetext_core::types::ImageSource;
use imagetext_engine::session::SessionOutcome;

fn usage() -> ! {
    eprintln!("usage: imagetext-cli extract [SAMPLE NAME]");
    eprintln!("       imagetext-cli generate [PROMPT]");
    eprintln!("       imagetext-cli samples");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("extract");

    if command == "samples" {
        for sample in sample_images() {
            println!("{} - {}", sample.name, sample.url);
        }
        println!();
        for prompt in sample_prompts() {
            println!("prompt: {prompt}");
        }
        return Ok(());
    }

    let data_dir = std::env::temp_dir().join("imagetext-demo");
    let api_key = std::env::var("IMAGETEXT_API_KEY").unwrap_or_default();
    let svc = AppService::new(
        data_dir.join("config.json"),
        data_dir.join("uploads.json"),
        api_key,
    )?;

    let mut events = svc.controller().subscribe();

    let outcome = match command {
        "extract" => {
            let name = args.get(1).cloned().unwrap_or_else(|| SAMPLE_HANDWRITTEN_NOTE.into());
            let source = match find_sample(&name) {
                Some(sample) => ImageSource::sample(sample.name, sample.url),
                None => ImageSource::Url(name),
            };
            log::info!("extracting from {}", source.display_name());
            svc.start_extraction(source).await?
        }
        "generate" => {
            let prompt = args
                .get(1)
                .cloned()
                .unwrap_or_else(|| sample_prompts()[0].to_string());
            log::info!("generating from prompt: {prompt}");
            svc.start_generation(&prompt).await
        }
        _ => usage(),
    };

    if outcome != StartOutcome::Started {
        anyhow::bail!("session not started: {outcome:?}");
    }

    loop {
        match events.recv().await? {
            SessionEvent::Stage { label, progress } => {
                println!("[{progress:>3}%] {label}");
            }
            SessionEvent::Completed(SessionOutcome::ExtractedText(extracted)) => {
                println!("\n--- extracted text ({}) ---", extracted.provider);
                println!("{}", extracted.text);
                break;
            }
            SessionEvent::Completed(SessionOutcome::GeneratedImage(image)) => {
                println!("\n--- generated image ---");
                println!("url:    {}", image.image_url);
                println!("prompt: {}", image.positive_prompt);
                println!("seed:   {}", image.seed);
                break;
            }
            SessionEvent::Failed(msg) => {
                anyhow::bail!("session failed: {msg}");
            }
            SessionEvent::Cancelled => {
                println!("cancelled");
                break;
            }
        }
    }

    let uploads = svc.recent_uploads()?;
    if !uploads.is_empty() {
        println!("\nrecent uploads:");
        for u in uploads.iter().rev().take(5) {
            println!("  {} ({:?})", u.name, u.kind);
        }
    }

    Ok(())
}
