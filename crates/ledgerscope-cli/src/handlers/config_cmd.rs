use crate::config::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn handle_show(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;

    println!("Config file: {}", config_path.display());
    if config.sources.is_empty() {
        println!("No snapshot sources registered");
        return Ok(());
    }

    let mut names: Vec<&String> = config.sources.keys().collect();
    names.sort();
    for name in names {
        println!("  {} -> {}", name, config.sources[name].display());
    }

    Ok(())
}

pub fn handle_set_source(config_path: &Path, name: String, path: PathBuf) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.set_source(name.clone(), path.clone());
    config.save_to(config_path)?;

    println!("Registered source '{}' -> {}", name, path.display());
    Ok(())
}
