use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::LaunchOptions;

#[derive(Parser)]
#[command(name = "cubedeck")]
#[command(author, version, about)]
#[command(long_about = "A slide-deck presenter with cross-fading transitions over a 3D cube field.\n\n\
    Slides come from a YAML deck file, or the built-in deck when none is given.\n\n\
    Examples:\n  \
    cubedeck                       Present the built-in deck (fullscreen)\n  \
    cubedeck talk.yaml --windowed  Present a deck in a window\n  \
    cubedeck talk.yaml --slide 3   Start on the third slide\n  \
    cubedeck outline talk.yaml     List the slides of a deck")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// YAML deck file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Open the navigator panel at startup
    #[arg(long, global = false)]
    pub navigator: bool,

    /// Skip the start screen and present immediately
    #[arg(long, global = false)]
    pub skip_intro: bool,

    /// Cut between slides instead of animating
    #[arg(long, global = false)]
    pub no_animations: bool,

    /// Do not draw the cube field
    #[arg(long, global = false)]
    pub no_background: bool,

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
    /// Print the slides of a deck
    Outline {
        /// YAML deck file (defaults to the built-in deck)
        file: Option<PathBuf>,
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

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.animations, defaults.start_slide)
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

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Outline { file }) => crate::commands::outline::run(file.as_deref()),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(ref file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                let options = LaunchOptions {
                    windowed: self.windowed,
                    start_slide: self.slide,
                    open_navigator: self.navigator,
                    skip_intro: self.skip_intro,
                    animations: !self.no_animations,
                    background: !self.no_background,
                };
                crate::app::run(self.file.as_deref(), options)
            }
        }
    }
}
