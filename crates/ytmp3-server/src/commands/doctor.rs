use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use ytmp3_core::Config;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("ytmp3 dependency check\n");

    let mut all_ok = true;

    print!("yt-dlp:  ");
    all_ok &= report(
        config.yt_dlp_path().ok(),
        &["--version"],
        |out| out.trim().to_string(),
        "pip install yt-dlp",
    );

    print!("ffmpeg:  ");
    let ffmpeg_ok = report(
        config.ffmpeg_path().ok(),
        &["-version"],
        |out| {
            // "ffmpeg version 6.1.1 Copyright ..."
            out.lines()
                .next()
                .and_then(|l| l.split_whitespace().nth(2))
                .unwrap_or("unknown")
                .to_string()
        },
        "apt install ffmpeg (or brew install ffmpeg)",
    );
    if !ffmpeg_ok && !config.audio.transcode {
        println!("         Not required: audio.transcode is disabled");
    } else {
        all_ok &= ffmpeg_ok;
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for installation instructions.");
    }

    Ok(())
}

fn report(
    path: Option<PathBuf>,
    version_args: &[&str],
    parse_version: impl Fn(&str) -> String,
    install_hint: &str,
) -> bool {
    let Some(path) = path else {
        println!("NOT FOUND");
        println!("         Install with: {}", install_hint);
        return false;
    };

    match Command::new(&path).args(version_args).output() {
        Ok(out) if out.status.success() => {
            let version = parse_version(&String::from_utf8_lossy(&out.stdout));
            println!("OK ({}, {})", version, path.display());
            true
        }
        _ => {
            println!("FOUND at {} but failed to get version", path.display());
            false
        }
    }
}
