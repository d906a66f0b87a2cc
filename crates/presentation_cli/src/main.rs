//! SpeechGate CLI
//!
//! Command-line interface for talking to the server and fetching models.

#![allow(clippy::print_stdout)]

use clap::Parser;
use presentation_cli::{
    Cli, Commands, DownloadOutcome, ModelDownload, SpeechGateClient,
    cli::log_filter_from_verbosity,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Health { url } => match SpeechGateClient::new(url).health().await {
            Ok(health) => {
                println!("✅ Healthy");
                println!("   TTS model loaded: {}", health.tts);
                println!("   STT model loaded: {}", health.stt);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },

        Commands::Speak {
            text,
            voice,
            speed,
            output,
            url,
        } => {
            println!("🗣️  Synthesizing: {text}");

            let audio = SpeechGateClient::new(url)
                .speak(&text, voice.as_deref(), speed)
                .await?;
            tokio::fs::write(&output, &audio).await?;

            println!("✅ Saved {} bytes to {}", audio.len(), output.display());
        },

        Commands::Transcribe { file, model, url } => {
            println!("👂 Transcribing: {}", file.display());

            let result = SpeechGateClient::new(url)
                .transcribe(&file, model.as_deref())
                .await?;

            println!("\n📝 Transcript ({}):\n{}", result.model, result.text);
        },

        Commands::DownloadModel {
            repo,
            file,
            revision,
            dir,
            endpoint,
            force,
        } => {
            let download = ModelDownload {
                endpoint,
                repo,
                revision,
                file,
                dir,
            };

            println!("📥 Downloading {}", download.url());

            match download.run(&reqwest::Client::new(), force).await? {
                DownloadOutcome::Downloaded { path, bytes } => {
                    let size_mb = bytes as f64 / 1_048_576.0;
                    println!("✅ Saved {size_mb:.1} MB to {}", path.display());
                },
                DownloadOutcome::AlreadyPresent { path } => {
                    println!("✅ Already present: {} (use --force to re-download)", path.display());
                },
            }
        },
    }

    Ok(())
}
