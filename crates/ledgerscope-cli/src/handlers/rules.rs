use crate::handlers::read_json;
use crate::types::OutputFormat;
use crate::views::{RuleCardView, RuleRow};
use anyhow::Result;
use is_terminal::IsTerminal;
use ledgerscope_engine::format_rule_conditions;
use ledgerscope_types::{NotificationChannel, NotificationRule};
use std::collections::HashMap;
use std::path::Path;

pub fn handle_list(path: &Path, channels: Option<&Path>, format: OutputFormat) -> Result<()> {
    let rules: Vec<NotificationRule> = read_json(path)?;

    let channel_names: HashMap<String, String> = match channels {
        Some(path) => read_json::<Vec<NotificationChannel>>(path)?
            .into_iter()
            .map(|channel| (channel.id.clone(), channel.name))
            .collect(),
        None => HashMap::new(),
    };

    let rows: Vec<RuleRow> = rules
        .iter()
        .map(|rule| RuleRow {
            id: rule.id.clone(),
            name: rule.name.clone().unwrap_or_else(|| format!("rule {}", rule.id)),
            event: rule.event.clone(),
            channel: channel_names
                .get(&rule.channel_id)
                .cloned()
                .unwrap_or_else(|| rule.channel_id.clone()),
            condition: format_rule_conditions(&rule.settings.rules),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["id", "name", "event", "channel", "condition"])?;
            for row in &rows {
                writer.write_record([&row.id, &row.name, &row.event, &row.channel, &row.condition])?;
            }
            writer.flush()?;
        }
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            for row in &rows {
                print!("{}", RuleCardView::new(row, color));
            }
        }
    }

    Ok(())
}
