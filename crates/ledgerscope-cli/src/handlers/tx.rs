use crate::types::OutputFormat;
use crate::views::GroupTableView;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use ledgerscope_engine::summarize_tx_types;
use ledgerscope_types::TxGroupsModel;
use std::path::Path;

pub fn handle_groups(path: &Path, top: bool, format: OutputFormat) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let counts: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in snapshot {}", path.display()))?;

    if !counts.is_object() {
        eprintln!("Warning: snapshot is not a JSON object; treating it as empty");
    }

    let model = summarize_tx_types(&counts);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
        OutputFormat::Csv => write_csv(&model, top)?,
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            print!("{}", GroupTableView::new(&model, top, color));
        }
    }

    Ok(())
}

fn write_csv(model: &TxGroupsModel, top: bool) -> Result<()> {
    let rows: Vec<(&str, &str, u64, f64)> = if top {
        model
            .top_groups
            .iter()
            .map(|g| (g.key.as_str(), g.label.as_str(), g.total, g.pct_of_all))
            .collect()
    } else {
        model
            .groups
            .iter()
            .map(|g| (g.key.as_str(), g.label.as_str(), g.total, g.pct_of_all))
            .collect()
    };

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["key", "label", "total", "pct_of_all"])?;
    for (key, label, total, pct) in rows {
        let total = total.to_string();
        let pct = format!("{:.2}", pct);
        writer.write_record([key, label, total.as_str(), pct.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
