use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(author, version, about)]
#[command(long_about = "A presenter for interactive closing decks.\n\n\
    Runs the built-in closing deck, or any deck YAML file, with live\n\
    calculators, feeds and objection handling on the slides.\n\n\
    Examples:\n  \
    pitchdeck                          Present the built-in deck (fullscreen)\n  \
    pitchdeck deck.yaml --windowed     Present a deck file in a window\n  \
    pitchdeck --route '#/7'            Open on slide 7\n  \
    pitchdeck roi --spend 1000 --cpc 5 Run the ROI calculator in the terminal")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck YAML file to present (defaults to the built-in closing deck)
    pub deck: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Deep link to open, e.g. '#/3'
    #[arg(long, global = false)]
    pub route: Option<String>,

    /// Skip transitions, entrances and background loops
    #[arg(long, global = false)]
    pub reduced_motion: bool,

    /// Prefix for reel clip paths
    #[arg(long, global = false, value_name = "URL")]
    pub media_base: Option<String>,

    /// Ignore and clear the saved slide and notes state
    #[arg(long, global = false)]
    pub fresh: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ad spend to leads, sales, revenue and ROAS
    Roi {
        /// Monthly ad spend in dollars
        #[arg(long, default_value = "5000")]
        spend: f64,

        /// Cost per click in dollars
        #[arg(long, default_value = "6")]
        cpc: f64,

        /// Click to lead conversion rate in percent
        #[arg(long, default_value = "8")]
        conversion: f64,

        /// Lead to sale close rate in percent
        #[arg(long, default_value = "25")]
        close: f64,

        /// Average order value in dollars
        #[arg(long, default_value = "33000")]
        aov: f64,
    },

    /// Monthly jobs and revenue from a lead volume
    Projection {
        /// Average ticket in dollars
        #[arg(long, default_value = "5000")]
        ticket: f64,

        /// Leads per month
        #[arg(long, default_value = "20")]
        leads: f64,

        /// Close rate in percent
        #[arg(long, default_value = "30")]
        close: f64,
    },

    /// Daily cost of an idle crew
    Idle {
        /// Crew size
        #[arg(long, default_value = "4")]
        crew: f64,

        /// Hourly cost per person in dollars
        #[arg(long, default_value = "35")]
        hourly: f64,

        /// Idle hours per day
        #[arg(long, default_value = "6")]
        hours: f64,
    },

    /// Inspect or clear the saved presenter state
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export slides as PNG images
    Export {
        /// Deck YAML file to export (defaults to the built-in deck)
        deck: Option<PathBuf>,

        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print the saved slide and notes state
    Show,

    /// Forget the saved state
    Reset,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.reduced_motion, media.base_url)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Launch options for the presenter, after CLI flags are merged with config.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub deck: Option<PathBuf>,
    pub windowed: bool,
    pub route: Option<String>,
    pub reduced_motion: bool,
    pub media_base: Option<String>,
    pub fresh: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Roi {
                spend,
                cpc,
                conversion,
                close,
                aov,
            }) => {
                crate::commands::roi::run(spend, cpc, conversion, close, aov);
                Ok(())
            }
            Some(Commands::Projection {
                ticket,
                leads,
                close,
            }) => {
                crate::commands::projection::run(ticket, leads, close);
                Ok(())
            }
            Some(Commands::Idle { crew, hourly, hours }) => {
                crate::commands::idle::run(crew, hourly, hours);
                Ok(())
            }
            Some(Commands::Session { command }) => crate::commands::session::run(command),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Export {
                deck,
                output_dir,
                width,
                height,
            }) => crate::commands::export::run(deck, output_dir, width, height),
            Some(Commands::Version) => {
                println!("pitchdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(deck) = &self.deck {
                    if !deck.exists() {
                        anyhow::bail!("File not found: {}", deck.display());
                    }
                }
                crate::app::run(LaunchOptions {
                    deck: self.deck,
                    windowed: self.windowed,
                    route: self.route,
                    reduced_motion: self.reduced_motion,
                    media_base: self.media_base,
                    fresh: self.fresh,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_flags() {
        let cli = Cli::try_parse_from([
            "pitchdeck",
            "deck.yaml",
            "--windowed",
            "--route",
            "#/3",
            "--reduced-motion",
            "--media-base",
            "https://cdn.example.com",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.deck, Some(PathBuf::from("deck.yaml")));
        assert!(cli.windowed && cli.reduced_motion && !cli.fresh);
        assert_eq!(cli.route.as_deref(), Some("#/3"));
    }

    #[test]
    fn test_parse_roi_defaults() {
        let cli = Cli::try_parse_from(["pitchdeck", "roi", "--spend", "1000"]).unwrap();
        match cli.command {
            Some(Commands::Roi { spend, cpc, .. }) => {
                assert_eq!(spend, 1000.0);
                assert_eq!(cpc, 6.0);
            }
            _ => panic!("expected roi"),
        }
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["pitchdeck", "session", "show", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
