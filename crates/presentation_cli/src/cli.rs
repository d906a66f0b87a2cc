//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Server URL used when neither `--url` nor `SPEECHGATE_URL` is set
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Hugging Face hub used when neither `--endpoint` nor `HF_ENDPOINT` is set
pub const DEFAULT_HUB_ENDPOINT: &str = "https://huggingface.co";

/// SpeechGate CLI
#[derive(Debug, Parser)]
#[command(name = "speechgate-cli")]
#[command(author, version, about = "SpeechGate TTS/STT gateway CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check server health (usable as a container healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, env = "SPEECHGATE_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Synthesize speech and save it as WAV
    ///
    /// Example: speechgate-cli speak "Hello world" --output hello.wav
    Speak {
        /// Text to speak
        text: String,

        /// Voice identifier (engine default if not given)
        #[arg(long)]
        voice: Option<String>,

        /// Speaking speed multiplier
        #[arg(long)]
        speed: Option<f64>,

        /// Output file
        #[arg(short, long, default_value = "speech.wav")]
        output: PathBuf,

        /// Server URL
        #[arg(short, long, env = "SPEECHGATE_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Transcribe an audio file
    ///
    /// Example: speechgate-cli transcribe recording.wav
    Transcribe {
        /// Audio file to upload
        file: PathBuf,

        /// Model name sent with the request
        #[arg(short, long)]
        model: Option<String>,

        /// Server URL
        #[arg(short, long, env = "SPEECHGATE_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Download a whisper.cpp model from the Hugging Face hub
    ///
    /// Example: speechgate-cli download-model --dir ./models/whisper-small
    DownloadModel {
        /// Hub repository
        #[arg(long, default_value = "ggerganov/whisper.cpp")]
        repo: String,

        /// File within the repository
        #[arg(long, default_value = "ggml-small.bin")]
        file: String,

        /// Git revision (branch, tag or commit)
        #[arg(long, default_value = "main")]
        revision: String,

        /// Target directory
        #[arg(long, env = "WHISPER_MODEL_DIR", default_value = "./models/whisper-small")]
        dir: PathBuf,

        /// Hub base URL
        #[arg(long, env = "HF_ENDPOINT", default_value = DEFAULT_HUB_ENDPOINT)]
        endpoint: String,

        /// Download again even if the file exists
        #[arg(long)]
        force: bool,
    },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Join a base URL and an absolute path
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
