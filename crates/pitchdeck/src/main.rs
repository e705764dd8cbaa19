mod app;
mod cli;
mod commands;
mod config;
mod deck;
mod navigation;
mod render;
mod session;
mod show;
mod stage;
mod theme;
mod widgets;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn init_logging(verbose: u8, quiet: bool, no_color: bool) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!no_color),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }
    cli.run()
}
