use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "robolint")]
#[command(about = "Schema validator for robot plugin repositories")]
#[command(version)]
pub struct Cli {
    /// Repository root (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a single plugin file
    Validate {
        /// Path to the plugin JSON file
        file: PathBuf,

        /// Emit findings as JSON instead of console output
        #[arg(long)]
        json: bool,
    },

    /// Validate the repository manifest and every plugin in the index
    ValidateAll,

    /// Regenerate plugins/index.json and the manifest plugin count
    UpdateIndex,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
