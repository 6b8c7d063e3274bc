//! URL to MP3 conversion pipeline

use crate::encoder::Mp3Encoder;
use crate::error::{ConvertError, Result};
use crate::extractor::{MediaSource, YtDlp};
use crate::filename::mp3_filename;
use crate::video_id::extract_video_id;
use crate::Config;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A converted file, held entirely in memory.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl AudioFile {
    pub const CONTENT_TYPE: &'static str = "audio/mpeg";
}

/// Probe, fetch, optionally re-encode. One linear pass per call.
pub struct Converter {
    source: Arc<dyn MediaSource>,
    encoder: Option<Mp3Encoder>,
}

impl Converter {
    pub fn new(source: Arc<dyn MediaSource>, encoder: Option<Mp3Encoder>) -> Self {
        Self { source, encoder }
    }

    /// Wire up yt-dlp and, when transcoding is on, ffmpeg from config.
    pub fn from_config(config: &Config) -> std::result::Result<Self, crate::error::ConfigError> {
        let source = YtDlp::new(config.yt_dlp_path()?, config.extractor.clone());
        let encoder = if config.audio.transcode {
            Some(Mp3Encoder::new(config.ffmpeg_path()?, config.audio.mp3_quality))
        } else {
            None
        };
        Ok(Self::new(Arc::new(source), encoder))
    }

    pub async fn convert(&self, raw_url: &str) -> Result<AudioFile> {
        let start_time = Instant::now();

        let video_id =
            extract_video_id(raw_url).ok_or_else(|| ConvertError::InvalidUrl(raw_url.to_string()))?;
        let canonical = video_id.canonical_url();
        info!("Converting {} via {}", video_id, canonical);

        // 1. Probe
        let media = self.source.probe(&canonical).await?;

        // 2. Fetch raw bytes
        let mut bytes = self.source.fetch(&media).await?;

        // 3. Re-encode unless the stream already is MP3
        if let Some(ref encoder) = self.encoder {
            if media.is_mp3() {
                debug!("Stream is already MP3, skipping encode");
            } else {
                bytes = encoder.encode(bytes).await?;
            }
        }

        let filename = mp3_filename(media.title.as_deref());
        info!(
            "Converted {} -> {} ({} bytes, {:.1}s)",
            video_id,
            filename,
            bytes.len(),
            start_time.elapsed().as_secs_f32()
        );

        Ok(AudioFile { filename, bytes })
    }
}
