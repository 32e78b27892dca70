//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Strict Roman numeral parser
#[derive(Parser, Debug)]
#[command(name = "romanum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (overrides the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Longest allowed run of one numeral
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u8).range(3..=4))]
    pub max_repetitions: Option<u8>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the decimal value of each numeral
    Parse {
        /// Roman numerals (case-insensitive)
        #[arg(required = true)]
        numerals: Vec<String>,
    },

    /// Report whether each numeral is valid
    Check {
        /// Roman numerals (case-insensitive)
        #[arg(required = true)]
        numerals: Vec<String>,
    },

    /// Show the composition tree of a numeral
    Tree {
        /// Roman numeral (case-insensitive)
        numeral: String,
    },

    /// Parse one numeral per line from a file (or stdin)
    Batch {
        /// Input file, stdin if omitted
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
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
    /// Show effective config
    Show,
    /// Print a config template
    Template,
    /// Show config file locations
    Path,
}
