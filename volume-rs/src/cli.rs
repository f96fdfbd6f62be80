//! Root CLI structure for volume-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "volume-rs")]
#[command(about = "Command-line tools for 3b volume container files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 3b volume file operations
    #[command(name = "3b")]
    ThreeB {
        #[command(subcommand)]
        command: crate::commands::threeb::ThreeBCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
