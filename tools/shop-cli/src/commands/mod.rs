//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod shell;

use clap::{Args, Subcommand};

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Path to open first (default: /).
    #[arg(long, default_value = "/")]
    pub start: String,

    /// Keep the cart in memory only; nothing is read or written.
    #[arg(long)]
    pub ephemeral: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the stored cart and its total.
    Show,
    /// Empty the stored cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
