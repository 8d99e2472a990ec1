use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledgerscope")]
#[command(about = "Render notification rules and ledger activity reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory holding config.toml (defaults to LEDGERSCOPE_PATH or
    /// the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect notification rules exported from the backend
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Inspect notification delivery channels
    Channels {
        #[command(subcommand)]
        command: ChannelsCommand,
    },

    /// Ledger activity reports
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },

    /// Manage the ledgerscope config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List rules with their rendered condition expressions
    List {
        /// Rules export (JSON array)
        #[arg(long)]
        file: PathBuf,

        /// Channels export used to resolve channel names
        #[arg(long)]
        channels: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ChannelsCommand {
    /// List channels with their delivery kind and rule counts
    List {
        /// Channels export (JSON array)
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum TxCommand {
    /// Group per-type transaction counts into a report
    Groups {
        /// Count-map snapshot (JSON object of type -> count)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Named snapshot source registered in the config file
        #[arg(long)]
        source: Option<String>,

        /// Only show the top groups
        #[arg(long)]
        top: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved config
    Show,

    /// Register a named count-map snapshot source
    SetSource { name: String, path: PathBuf },
}
