mod api_error;
mod args;
mod commands;
mod routes;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "ytmp3=info,ytmp3_core=info,actix_web=info",
        1 => "ytmp3=debug,ytmp3_core=debug,actix_web=info",
        2 => "ytmp3=trace,ytmp3_core=trace,actix_web=debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Some(Commands::Serve(options)) => {
            commands::serve::run(&options, cli.config.as_deref()).await
        }
        Some(Commands::Doctor) => commands::doctor::run(cli.config.as_deref()),
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()),
        None => commands::serve::run(&args::ServeOptions::default(), cli.config.as_deref()).await,
    }
}
