use ledgerscope_types::TxGroupsModel;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

// --------------------------------------------------------
// Group Report View
// --------------------------------------------------------

const BAR_WIDTH: usize = 30;

pub struct GroupTableView<'a> {
    model: &'a TxGroupsModel,
    top_only: bool,
    color: bool,
}

impl<'a> GroupTableView<'a> {
    pub fn new(model: &'a TxGroupsModel, top_only: bool, color: bool) -> Self {
        Self {
            model,
            top_only,
            color,
        }
    }

    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        total: u64,
        pct: f64,
    ) -> fmt::Result {
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        // Non-zero groups always show at least a sliver
        let filled = filled.clamp(1, BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let label = format!("{:<12}", label);

        if self.color {
            writeln!(
                f,
                "{} {:>8}  {:>6.2}%  {}",
                label.bold(),
                total,
                pct,
                bar.cyan()
            )
        } else {
            writeln!(f, "{} {:>8}  {:>6.2}%  {}", label, total, pct, bar)
        }
    }
}

impl fmt::Display for GroupTableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.model.total == 0 {
            return writeln!(f, "No transactions in snapshot");
        }

        writeln!(f, "{} transactions", self.model.total)?;

        if self.top_only {
            for group in &self.model.top_groups {
                self.write_row(f, &group.label, group.total, group.pct_of_all)?;
            }
        } else {
            for group in &self.model.groups {
                self.write_row(f, &group.label, group.total, group.pct_of_all)?;
                for entry in &group.types {
                    let line = format!("    {:<24} {:>8}", entry.tx_type, entry.count);
                    if self.color {
                        writeln!(f, "{}", line.dimmed())?;
                    } else {
                        writeln!(f, "{}", line)?;
                    }
                }
            }
        }

        Ok(())
    }
}

// --------------------------------------------------------
// Rule Card View
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RuleRow {
    pub id: String,
    pub name: String,
    pub event: String,
    pub channel: String,
    pub condition: String,
}

pub struct RuleCardView<'a> {
    row: &'a RuleRow,
    color: bool,
}

impl<'a> RuleCardView<'a> {
    pub fn new(row: &'a RuleRow, color: bool) -> Self {
        Self { row, color }
    }
}

impl fmt::Display for RuleCardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.color {
            writeln!(f, "#{} {}", self.row.id, self.row.name.bold())?;
        } else {
            writeln!(f, "#{} {}", self.row.id, self.row.name)?;
        }

        writeln!(f, "    on {} -> {}", self.row.event, self.row.channel)?;

        if self.row.condition.is_empty() {
            writeln!(f, "    when always")
        } else {
            writeln!(f, "    when {}", self.row.condition)
        }
    }
}

// --------------------------------------------------------
// Channel Line View
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChannelRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub label: String,
    pub rule_count: u64,
    pub settings_ok: bool,
}

pub struct ChannelLineView<'a> {
    row: &'a ChannelRow,
    color: bool,
}

impl<'a> ChannelLineView<'a> {
    pub fn new(row: &'a ChannelRow, color: bool) -> Self {
        Self { row, color }
    }
}

impl fmt::Display for ChannelLineView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = match self.row.rule_count {
            1 => "1 rule".to_string(),
            n => format!("{} rules", n),
        };
        let status = if self.row.settings_ok {
            "settings ok"
        } else {
            "settings invalid"
        };

        if self.color {
            let status = if self.row.settings_ok {
                status.green().to_string()
            } else {
                status.red().to_string()
            };
            writeln!(
                f,
                "#{} {}  [{}]  {}  {}",
                self.row.id,
                self.row.name.bold(),
                self.row.label,
                rules,
                status
            )
        } else {
            writeln!(
                f,
                "#{} {}  [{}]  {}  {}",
                self.row.id, self.row.name, self.row.label, rules, status
            )
        }
    }
}
