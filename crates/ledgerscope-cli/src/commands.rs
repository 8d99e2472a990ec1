use super::args::{ChannelsCommand, Cli, Commands, ConfigCommand, RulesCommand, TxCommand};
use super::handlers;
use crate::config::{Config, resolve_data_dir};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Rules { command } => match command {
            RulesCommand::List { file, channels } => {
                handlers::rules::handle_list(&file, channels.as_deref(), cli.format)
            }
        },

        Commands::Channels { command } => match command {
            ChannelsCommand::List { file } => handlers::channels::handle_list(&file, cli.format),
        },

        Commands::Tx { command } => match command {
            TxCommand::Groups { file, source, top } => {
                let path = resolve_counts_path(&data_dir, file, source)?;
                handlers::tx::handle_groups(&path, top, cli.format)
            }
        },

        Commands::Config { command } => {
            let config_path = data_dir.join("config.toml");
            match command {
                ConfigCommand::Show => handlers::config_cmd::handle_show(&config_path),
                ConfigCommand::SetSource { name, path } => {
                    handlers::config_cmd::handle_set_source(&config_path, name, path)
                }
            }
        }
    }
}

/// An explicit --file always wins; otherwise the named source is looked up in
/// the config file.
fn resolve_counts_path(
    data_dir: &Path,
    file: Option<PathBuf>,
    source: Option<String>,
) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }

    let Some(source) = source else {
        bail!("either --file or --source is required");
    };

    let config = Config::load_from(&data_dir.join("config.toml"))?;
    config.sources.get(&source).cloned().with_context(|| {
        format!(
            "source '{}' is not registered; run 'ledgerscope config set-source {} <path>' first",
            source, source
        )
    })
}
