//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::render::RendererKind;
use crate::traversal::TraversalKind;

/// In-memory genealogy registry: people, marriages, and generation-wise kinship queries
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Traversal strategy for generation queries
    #[arg(short = 't', long, value_enum, global = true)]
    pub traversal: Option<TraversalKind>,

    /// Renderer for generation listings
    #[arg(short = 'r', long, value_enum, global = true)]
    pub renderer: Option<RendererKind>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (default)
    Repl,

    /// Run session commands from a script file
    Run {
        /// Script file, one session command per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Print the global config file path
    Path,
    /// Write the default config to the global path
    Init,
}
