mod args;
mod commands;
pub mod config;
mod handlers;
pub mod types;
mod views;

pub use args::{ChannelsCommand, Cli, Commands, ConfigCommand, RulesCommand, TxCommand};
pub use commands::run;
