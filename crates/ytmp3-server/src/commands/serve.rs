use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use ytmp3_core::{Config, Converter};

use crate::args::ServeOptions;
use crate::routes::{self, AppState};

pub async fn run(options: &ServeOptions, config_path: Option<&Path>) -> Result<()> {
    let mut config = Config::load(config_path)?;
    apply_overrides(&mut config, options);

    let converter = Converter::from_config(&config)
        .context("Missing external tool; run `ytmp3 doctor` for details")?;

    let state = web::Data::new(AppState {
        converter,
        public_url: config.server.public_url.clone(),
    });

    let (host, port) = config.bind_addr();
    info!("Listening on http://{}:{}", host, port);
    info!(
        "yt-dlp options: format={} socket_timeout={}s retries={} fragment_retries={}",
        config.extractor.format,
        config.extractor.socket_timeout_secs,
        config.extractor.retries,
        config.extractor.fragment_retries
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.run().await?;
    Ok(())
}

fn apply_overrides(config: &mut Config, options: &ServeOptions) {
    if let Some(ref host) = options.host {
        config.server.host = host.clone();
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if let Some(workers) = options.workers {
        config.server.workers = Some(workers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_only_touch_given_fields() {
        let mut config = Config::default();
        let options = ServeOptions {
            port: Some(8080),
            ..ServeOptions::default()
        };
        apply_overrides(&mut config, &options);

        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(config.server.workers, None);
    }
}
