//! JSON error bodies for the conversion endpoint

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use ytmp3_core::ConvertError;

pub const REQUIRED_FORMAT: &str = "https://www.youtube.com/watch?v=11_DIGIT_ID";
pub const EXAMPLE_VIDEO: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

pub const SOLUTION: [&str; 3] = [
    "1. Try a different video",
    "2. Use VPN if blocked",
    "3. Check https://github.com/yt-dlp/yt-dlp/issues if problem persists",
];

/// What the client sees. Causes stay in the server log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid URL")]
    InvalidUrl { public_url: String },

    #[error("Conversion failed")]
    ConversionFailed,
}

impl ApiError {
    pub fn from_convert(err: &ConvertError, public_url: &str) -> Self {
        match err {
            ConvertError::InvalidUrl(_) => ApiError::InvalidUrl {
                public_url: public_url.trim_end_matches('/').to_string(),
            },
            ConvertError::ConversionFailed(_) => ApiError::ConversionFailed,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            ApiError::ConversionFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::InvalidUrl { public_url } => json!({
                "error": self.to_string(),
                "required_format": REQUIRED_FORMAT,
                "example": format!("{}/convert?url={}", public_url, EXAMPLE_VIDEO),
            }),
            ApiError::ConversionFailed => json!({
                "error": self.to_string(),
                "solution": SOLUTION,
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
