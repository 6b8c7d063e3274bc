use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ytmp3")]
#[command(author, version, about = "YouTube to MP3 conversion over HTTP")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true, env = "YTMP3_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeOptions),

    /// Check that yt-dlp and ffmpeg are installed
    Doctor,

    /// Show the effective configuration
    Config,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct ServeOptions {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// HTTP worker threads (overrides server.workers)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["ytmp3"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "ytmp3",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Serve(opts)) => {
                assert_eq!(opts.port, Some(8080));
                assert_eq!(opts.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(opts.workers, None);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
