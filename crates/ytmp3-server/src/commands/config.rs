use anyhow::{Context, Result};
use std::path::Path;
use ytmp3_core::Config;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("ytmp3 configuration\n");
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    println!("{}", rendered.trim_end());

    if config.paths.yt_dlp.is_none() || config.paths.ffmpeg.is_none() {
        println!("\n# unset tool paths are auto-detected from PATH");
    }

    // Show config file locations
    println!("\nConfig sources (later wins):");
    if let Some(config_dir) = dirs::config_dir() {
        println!("  1. {}/ytmp3/config.toml", config_dir.display());
    }
    if let Some(p) = config_path {
        println!("  2. {} (specified)", p.display());
    }
    println!("  3. Environment variables (YTMP3_*, nested with __, e.g. YTMP3_SERVER__PORT)");

    Ok(())
}
