//! Error types for ytmp3-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// The two outcomes a caller can observe besides success.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid URL: no 11-character video id in {0:?}")]
    InvalidUrl(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(#[from] StageError),
}

/// Where inside the pipeline a conversion broke.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("extraction: {0}")]
    Extract(#[from] ExtractError),

    #[error("encoding: {0}")]
    Encode(#[from] EncodeError),
}

impl From<ExtractError> for ConvertError {
    fn from(e: ExtractError) -> Self {
        ConvertError::ConversionFailed(StageError::Extract(e))
    }
}

impl From<EncodeError> for ConvertError {
    fn from(e: EncodeError) -> Self {
        ConvertError::ConversionFailed(StageError::Encode(e))
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("yt-dlp not found. Install with: pip install yt-dlp")]
    YtDlpNotFound,

    #[error("yt-dlp failed with exit code {code:?}: {stderr}")]
    YtDlpFailed { code: Option<i32>, stderr: String },

    #[error("Video unavailable or private: {0}")]
    VideoUnavailable(String),

    #[error("Failed to parse metadata: {0}")]
    MetadataParse(String),

    #[error("Metadata has no direct stream url")]
    MissingStreamUrl,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Stream fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Stream host answered with HTTP {0}")]
    FetchStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("FFmpeg not found. Install with: apt install ffmpeg")]
    FfmpegNotFound,

    #[error("FFmpeg encoding failed with exit code {code:?}: {stderr}")]
    FfmpegFailed { code: Option<i32>, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_errors_collapse_into_conversion_failed() {
        let err: ConvertError = ExtractError::MissingStreamUrl.into();
        assert!(matches!(
            err,
            ConvertError::ConversionFailed(StageError::Extract(ExtractError::MissingStreamUrl))
        ));

        let err: ConvertError = EncodeError::FfmpegNotFound.into();
        assert!(matches!(err, ConvertError::ConversionFailed(StageError::Encode(_))));
    }

    #[test]
    fn messages_keep_the_cause() {
        let err: ConvertError = ExtractError::FetchStatus(403).into();
        assert_eq!(
            err.to_string(),
            "Conversion failed: extraction: Stream host answered with HTTP 403"
        );
    }
}
