//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::TraversalOrder;

/// Build a binary search tree from integers and inspect it
#[derive(Parser, Debug)]
#[command(name = "ordtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "ORDTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Tree contents shared by every tree command.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeInput {
    /// Values inserted in the order given
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<i64>,

    /// Values deleted after all insertions (comma separated)
    #[arg(short = 'x', long = "delete", value_delimiter = ',', allow_negative_numbers = true)]
    pub delete: Vec<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print elements in traversal order
    Walk {
        #[command(flatten)]
        input: TreeInput,

        /// Traversal order: in, pre or post (default from settings)
        #[arg(short, long)]
        order: Option<TraversalOrder>,

        /// Print at most this many elements
        #[arg(short, long)]
        limit: Option<usize>,

        /// Stop the walk after visiting this value
        #[arg(long, allow_negative_numbers = true)]
        stop_at: Option<i64>,
    },

    /// Draw the tree shape
    Show {
        #[command(flatten)]
        input: TreeInput,
    },

    /// Look up a value
    Find {
        /// Value to look up
        #[arg(short, long, allow_negative_numbers = true)]
        key: i64,

        #[command(flatten)]
        input: TreeInput,
    },

    /// Print size, height and root
    Stats {
        #[command(flatten)]
        input: TreeInput,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
}
