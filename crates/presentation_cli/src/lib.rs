//! SpeechGate command-line tooling
//!
//! Client commands for a running server and the whisper.cpp model
//! downloader.

pub mod cli;
pub mod client;
pub mod download;

pub use cli::{Cli, Commands};
pub use client::{ClientError, SpeechGateClient};
pub use download::{DownloadError, DownloadOutcome, ModelDownload};
