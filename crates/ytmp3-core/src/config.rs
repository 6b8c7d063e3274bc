//! Configuration management for ytmp3

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub extractor: ExtractorConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Base URL advertised in error hints
    pub public_url: String,
    /// HTTP worker count (actix default: one per core)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to yt-dlp binary (auto-detected if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yt_dlp: Option<PathBuf>,
    /// Path to FFmpeg binary (auto-detected if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<PathBuf>,
}

/// Options handed to yt-dlp on every probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Format selector (default: bestaudio/best)
    pub format: String,
    /// Socket timeout for yt-dlp and the stream fetch
    pub socket_timeout_secs: u64,
    /// Retries for the whole extraction
    pub retries: u32,
    /// Retries per fragment
    pub fragment_retries: u32,
    /// Keep going when fragments are missing
    pub skip_unavailable_fragments: bool,
    /// YouTube client identities to impersonate
    pub player_client: Vec<String>,
    /// Player requests to skip
    pub player_skip: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Re-encode non-MP3 streams with ffmpeg
    pub transcode: bool,
    /// LAME VBR quality, 0 (best) to 9
    pub mp3_quality: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            public_url: "http://localhost:5000".to_string(),
            workers: None,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            format: "bestaudio/best".to_string(),
            socket_timeout_secs: 15,
            retries: 3,
            fragment_retries: 3,
            skip_unavailable_fragments: true,
            player_client: vec!["android".to_string()],
            player_skip: vec!["configs".to_string()],
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            transcode: true,
            mp3_quality: 5,
        }
    }
}

impl ExtractorConfig {
    pub fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout_secs)
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("ytmp3/config.toml");
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        // Keys contain underscores, so nesting uses a double underscore
        figment = figment.merge(Env::prefixed("YTMP3_").split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue("server.port must be non-zero".to_string()));
        }
        if self.audio.mp3_quality > 9 {
            return Err(ConfigError::InvalidValue(format!(
                "audio.mp3_quality must be 0-9, got {}",
                self.audio.mp3_quality
            )));
        }
        if self.extractor.socket_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "extractor.socket_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    /// Get FFmpeg path, auto-detecting if not configured
    pub fn ffmpeg_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.ffmpeg {
            Ok(path.clone())
        } else {
            which::which("ffmpeg")
                .map_err(|_| ConfigError::InvalidValue("ffmpeg not found in PATH".to_string()))
        }
    }
}
