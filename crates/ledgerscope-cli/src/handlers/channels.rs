use crate::handlers::read_json;
use crate::types::OutputFormat;
use crate::views::{ChannelLineView, ChannelRow};
use anyhow::Result;
use is_terminal::IsTerminal;
use ledgerscope_types::NotificationChannel;
use std::path::Path;

pub fn handle_list(path: &Path, format: OutputFormat) -> Result<()> {
    let channels: Vec<NotificationChannel> = read_json(path)?;

    let rows: Vec<ChannelRow> = channels
        .iter()
        .map(|channel| {
            let settings_ok = match channel.typed_settings() {
                Ok(_) => true,
                Err(err) => {
                    eprintln!("Warning: channel {} ({}): {}", channel.id, channel.name, err);
                    false
                }
            };
            ChannelRow {
                id: channel.id.clone(),
                name: channel.name.clone(),
                kind: channel.kind.to_string(),
                label: channel.kind.label().to_string(),
                rule_count: channel.rule_count,
                settings_ok,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["id", "name", "type", "rule_count", "settings_ok"])?;
            for row in &rows {
                writer.write_record([
                    &row.id,
                    &row.name,
                    &row.kind,
                    &row.rule_count.to_string(),
                    &row.settings_ok.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            for row in &rows {
                print!("{}", ChannelLineView::new(row, color));
            }
        }
    }

    Ok(())
}
