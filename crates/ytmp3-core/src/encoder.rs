//! MP3 encoder using FFmpeg over pipes

use crate::error::EncodeError;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Mp3Encoder {
    ffmpeg_path: PathBuf,
    quality: u8,
}

impl Mp3Encoder {
    pub fn new(ffmpeg_path: PathBuf, quality: u8) -> Self {
        Self { ffmpeg_path, quality }
    }

    /// Re-encode an in-memory audio stream to MP3. Nothing touches disk.
    pub async fn encode(&self, input: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
        info!("Encoding {} bytes to MP3 (q={})", input.len(), self.quality);

        let mut child = Command::new(&self.ffmpeg_path)
            .args(self.codec_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => EncodeError::FfmpegNotFound,
                _ => EncodeError::Io(e),
            })?;

        // Feed stdin concurrently so a full stdout pipe cannot stall ffmpeg
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EncodeError::Io(std::io::Error::other("ffmpeg stdin unavailable")))?;
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        });

        let output = child.wait_with_output().await?;

        // A broken pipe here means ffmpeg exited early; its status says why
        match writer.await {
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => {
                warn!("ffmpeg stdin write failed: {}", e)
            }
            Err(e) => warn!("ffmpeg stdin task failed: {}", e),
            _ => {}
        }

        if !output.status.success() {
            return Err(EncodeError::FfmpegFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("Encoded {} bytes of MP3", output.stdout.len());
        Ok(output.stdout)
    }

    fn codec_args(&self) -> Vec<String> {
        let quality = self.quality.to_string();
        let args = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-i",
            "pipe:0",
            // Drop any cover art or video track
            "-vn",
            "-c:a",
            "libmp3lame",
            "-q:a",
            quality.as_str(),
            "-f",
            "mp3",
            "pipe:1",
        ];
        args.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_args() {
        let args = Mp3Encoder::new(PathBuf::from("ffmpeg"), 5).codec_args();
        let joined = args.join(" ");
        assert!(joined.contains("-i pipe:0"));
        assert!(joined.contains("-c:a libmp3lame"));
        assert!(joined.contains("-q:a 5"));
        assert!(joined.ends_with("-f mp3 pipe:1"));
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let encoder = Mp3Encoder::new(PathBuf::from("/nonexistent/ytmp3-test/ffmpeg"), 5);
        let err = encoder.encode(vec![0u8; 16]).await.unwrap_err();
        assert!(matches!(err, EncodeError::FfmpegNotFound));
    }
}
