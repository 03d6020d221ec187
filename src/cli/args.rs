//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Snailfish number arithmetic: parse, add and reduce nested pair expressions
#[derive(Parser, Debug)]
#[command(name = "snailfish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Local config file (default: ./.snailfish.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "SNAILFISH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print both puzzle answers for an input file
    Solve {
        /// Input file, one snailfish number per line ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Add every line in order and print the reduced sum
    Sum {
        /// Input file, one snailfish number per line ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Largest magnitude of any two distinct lines added together
    Largest {
        /// Input file, one snailfish number per line ("-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Add two snailfish numbers and reduce the result
    Add {
        /// Left operand
        left: String,
        /// Right operand
        right: String,
    },

    /// Reduce a snailfish number to normal form
    Reduce {
        /// Snailfish number
        expression: String,
        /// Print every intermediate step
        #[arg(short, long)]
        steps: bool,
    },

    /// Magnitude of a snailfish number, as given
    Magnitude {
        /// Snailfish number
        expression: String,
    },

    /// Show a snailfish number as a tree
    Tree {
        /// Snailfish number
        expression: String,
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
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config instead of ./.snailfish.toml
        #[arg(short, long)]
        global: bool,
    },
}
