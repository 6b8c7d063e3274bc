//! ytmp3-core: YouTube video id parsing and the yt-dlp/ffmpeg conversion pipeline

pub mod config;
pub mod converter;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod video_id;

pub use config::Config;
pub use converter::{AudioFile, Converter};
pub use error::{ConvertError, Result};
pub use video_id::{extract_video_id, VideoId};
