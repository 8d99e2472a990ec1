// Engine module - pure compute over explorer documents (conditions, activity counts)
// This layer sits between backend-provided JSON snapshots and presentation

pub mod conditions;
pub mod error;
pub mod txgroups;

pub use conditions::{format_condition, parse_conditions};
pub use error::{Error, Result};
pub use txgroups::{build_tx_groups_model, pick_base_bucket};

use ledgerscope_types::TxGroupsModel;
use serde_json::Value;

// Façade API - stable public interface for display layers
// Callers should use these functions instead of reaching into internal modules

/// Render a rule's condition document as one human-readable boolean expression.
/// Total over any JSON input; malformed fragments contribute nothing.
pub fn format_rule_conditions(rules: &Value) -> String {
    parse_conditions(rules)
}

/// Aggregate a raw transaction-type count map into report groups with totals,
/// percentage shares, and a top-3 ranking.
pub fn summarize_tx_types(counts: &Value) -> TxGroupsModel {
    build_tx_groups_model(counts)
}
