use actix_web::http::header::{
    Charset, ContentDisposition, ContentType, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpResponse};
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;
use ytmp3_core::{AudioFile, ConvertError, Converter};

use crate::api_error::ApiError;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>YouTube MP3 Converter</title></head>
<body>
    <h1>Working YouTube MP3 Converter</h1>
    <h3>Test These Working Examples:</h3>
    <ul>
        <li><a href="/convert?url=https://www.youtube.com/watch?v=dQw4w9WgXcQ">Example 1 (Rick Astley)</a></li>
        <li><a href="/convert?url=https://www.youtube.com/watch?v=LXb3EKWsInQ">Example 2 (Travel Video)</a></li>
    </ul>
    <p><strong>Note:</strong> Always use full 11-character video IDs</p>
</body>
</html>
"#;

pub struct AppState {
    pub converter: Converter,
    /// Base URL used in the example of the invalid-URL hint
    pub public_url: String,
}

/// First `url` value of the query string; a repeated key keeps the first.
fn first_url(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/convert").route(web::get().to(convert)));
}

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(HOME_PAGE)
}

async fn convert(
    query: web::Query<Vec<(String, String)>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let url = first_url(query.into_inner());
    let request_id = Uuid::new_v4();

    let result = state
        .converter
        .convert(&url)
        .instrument(info_span!("convert", %request_id))
        .await;

    match result {
        Ok(audio) => Ok(attachment_response(audio)),
        Err(e) => {
            match &e {
                ConvertError::InvalidUrl(_) => warn!(%request_id, "Rejected url: {:?}", url),
                ConvertError::ConversionFailed(_) => error!(%request_id, "Failed: {}", e),
            }
            Err(ApiError::from_convert(&e, &state.public_url))
        }
    }
}

fn attachment_response(audio: AudioFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(AudioFile::CONTENT_TYPE)
        .insert_header(attachment_disposition(&audio.filename))
        .body(audio.bytes)
}

/// `attachment; filename="<name>"`, plus an RFC 5987 copy for non-ASCII names
fn attachment_disposition(filename: &str) -> ContentDisposition {
    let mut parameters = vec![DispositionParam::Filename(filename.to_string())];
    if !filename.is_ascii() {
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.as_bytes().to_vec(),
        }));
    }

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}
