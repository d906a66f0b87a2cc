//! Model download from the Hugging Face hub
//!
//! Files are streamed to `<file>.part` inside the target directory and
//! renamed into place once complete, so an interrupted download never
//! leaves a truncated model where the server looks for it.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Download errors
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Transport failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Hub answered with an error status
    #[error("Download of {url} failed with HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status
        status: reqwest::StatusCode,
    },

    /// Filesystem failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

impl DownloadError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One file to fetch from a hub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDownload {
    /// Hub base URL
    pub endpoint: String,
    /// Repository, `owner/name`
    pub repo: String,
    /// Branch, tag or commit
    pub revision: String,
    /// File within the repository
    pub file: String,
    /// Local directory to place the file in
    pub dir: PathBuf,
}

/// What a download run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// File fetched and written
    Downloaded {
        /// Final location
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// File was already present
    AlreadyPresent {
        /// Existing location
        path: PathBuf,
    },
}

impl ModelDownload {
    /// `<endpoint>/<repo>/resolve/<revision>/<file>`
    pub fn url(&self) -> String {
        format!(
            "{}/{}/resolve/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.repo,
            self.revision,
            self.file
        )
    }

    /// Final location of the file
    pub fn target_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    fn partial_path(&self) -> PathBuf {
        self.dir.join(format!("{}.part", self.file))
    }

    /// Fetch the file unless it is already present (or `force` is set)
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` on transport, HTTP status or filesystem
    /// failures. The partial file is removed on failure.
    #[instrument(skip(self, client), fields(url = %self.url()))]
    pub async fn run(
        &self,
        client: &reqwest::Client,
        force: bool,
    ) -> Result<DownloadOutcome, DownloadError> {
        let target = self.target_path();
        if !force && tokio::fs::try_exists(&target).await.unwrap_or(false) {
            info!(path = %target.display(), "Model already present, skipping download");
            return Ok(DownloadOutcome::AlreadyPresent { path: target });
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(DownloadError::io(&self.dir))?;

        let partial = self.partial_path();
        let result = self.fetch_to(client, &partial).await;
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            },
        };

        tokio::fs::rename(&partial, &target)
            .await
            .map_err(DownloadError::io(&target))?;

        info!(path = %target.display(), bytes, "Model downloaded");
        Ok(DownloadOutcome::Downloaded {
            path: target,
            bytes,
        })
    }

    async fn fetch_to(&self, client: &reqwest::Client, partial: &Path) -> Result<u64, DownloadError> {
        let url = self.url();
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url,
                status: response.status(),
            });
        }

        let total = response.content_length();
        debug!(?total, "Starting download");

        let mut file = tokio::fs::File::create(partial)
            .await
            .map_err(DownloadError::io(partial))?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        let mut next_report: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(DownloadError::io(partial))?;
            written += chunk.len() as u64;

            if written >= next_report {
                debug!(written, ?total, "Download progress");
                next_report = written + 16 * 1024 * 1024;
            }
        }

        file.flush().await.map_err(DownloadError::io(partial))?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whisper_small(dir: &Path) -> ModelDownload {
        ModelDownload {
            endpoint: "https://huggingface.co/".to_string(),
            repo: "ggerganov/whisper.cpp".to_string(),
            revision: "main".to_string(),
            file: "ggml-small.bin".to_string(),
            dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn url_follows_hub_layout() {
        let download = whisper_small(Path::new("./models/whisper-small"));
        assert_eq!(
            download.url(),
            "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin"
        );
    }

    #[test]
    fn paths_live_in_target_dir() {
        let download = whisper_small(Path::new("/models/whisper-small"));
        assert_eq!(
            download.target_path(),
            PathBuf::from("/models/whisper-small/ggml-small.bin")
        );
        assert_eq!(
            download.partial_path(),
            PathBuf::from("/models/whisper-small/ggml-small.bin.part")
        );
    }

    #[tokio::test]
    async fn existing_file_is_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ggml-small.bin"), b"model").unwrap();
        let mut download = whisper_small(dir.path());
        download.endpoint = "http://127.0.0.1:9".to_string();

        let outcome = download.run(&reqwest::Client::new(), false).await.unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::AlreadyPresent {
                path: dir.path().join("ggml-small.bin")
            }
        );
    }
}
