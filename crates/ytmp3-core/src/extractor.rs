//! Media extraction through yt-dlp

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// What a probe reports about one video, as printed by `yt-dlp -J`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Direct stream URL of the selected format
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    /// Headers the stream host expects on the fetch
    #[serde(default)]
    pub http_headers: HashMap<String, String>,
}

impl MediaInfo {
    pub fn from_json(raw: &[u8]) -> Result<Self, ExtractError> {
        serde_json::from_slice(raw).map_err(|e| ExtractError::MetadataParse(e.to_string()))
    }

    pub fn stream_url(&self) -> Result<&str, ExtractError> {
        self.url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ExtractError::MissingStreamUrl)
    }

    pub fn is_mp3(&self) -> bool {
        self.ext.as_deref() == Some("mp3") || self.acodec.as_deref() == Some("mp3")
    }
}

/// The external extraction collaborator.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Resolve a video page into metadata and a direct stream URL.
    async fn probe(&self, url: &str) -> Result<MediaInfo, ExtractError>;

    /// Fetch the raw stream bytes into memory.
    async fn fetch(&self, info: &MediaInfo) -> Result<Vec<u8>, ExtractError>;
}

#[derive(Debug)]
pub struct YtDlp {
    yt_dlp_path: PathBuf,
    options: ExtractorConfig,
}

impl YtDlp {
    pub fn new(yt_dlp_path: PathBuf, options: ExtractorConfig) -> Self {
        Self { yt_dlp_path, options }
    }

    /// Arguments for a metadata-only probe of `url`.
    pub fn probe_args(&self, url: &str) -> Vec<String> {
        let opts = &self.options;
        let mut args: Vec<String> = vec![
            "-J".into(),
            "--no-playlist".into(),
            "-f".into(),
            opts.format.clone(),
            "--quiet".into(),
            "--no-warnings".into(),
            "--socket-timeout".into(),
            opts.socket_timeout_secs.to_string(),
            "--retries".into(),
            opts.retries.to_string(),
            "--fragment-retries".into(),
            opts.fragment_retries.to_string(),
        ];

        if opts.skip_unavailable_fragments {
            args.push("--skip-unavailable-fragments".into());
        } else {
            args.push("--abort-on-unavailable-fragments".into());
        }

        if let Some(extractor_args) = youtube_extractor_args(opts) {
            args.push("--extractor-args".into());
            args.push(extractor_args);
        }

        args.push(url.to_string());
        args
    }
}

/// `youtube:player_client=android;player_skip=configs`
fn youtube_extractor_args(opts: &ExtractorConfig) -> Option<String> {
    let mut parts = Vec::new();
    if !opts.player_client.is_empty() {
        parts.push(format!("player_client={}", opts.player_client.join(",")));
    }
    if !opts.player_skip.is_empty() {
        parts.push(format!("player_skip={}", opts.player_skip.join(",")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("youtube:{}", parts.join(";")))
    }
}

#[async_trait]
impl MediaSource for YtDlp {
    async fn probe(&self, url: &str) -> Result<MediaInfo, ExtractError> {
        info!("Probing: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(self.probe_args(url))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExtractError::YtDlpNotFound,
                _ => ExtractError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("yt-dlp stderr: {}", stderr);

            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(ExtractError::VideoUnavailable(url.to_string()));
            }

            return Err(ExtractError::YtDlpFailed {
                code: output.status.code(),
                stderr,
            });
        }

        let metadata = MediaInfo::from_json(&output.stdout)?;
        debug!(
            "Probed: {} ({}) ext={:?} acodec={:?}",
            metadata.title.as_deref().unwrap_or("<untitled>"),
            metadata.id,
            metadata.ext,
            metadata.acodec
        );
        Ok(metadata)
    }

    async fn fetch(&self, info: &MediaInfo) -> Result<Vec<u8>, ExtractError> {
        let url = info.stream_url()?;

        // Independent client per fetch; nothing is pooled across requests
        let timeout = self.options.socket_timeout();
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| ExtractError::HttpClient(e.to_string()))?;

        let mut request = client.get(url);
        for (name, value) in &info.http_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::FetchStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        info!("Fetched {} bytes for {}", body.len(), info.id);
        Ok(body.to_vec())
    }
}
