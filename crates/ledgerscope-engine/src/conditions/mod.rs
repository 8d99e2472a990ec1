//! Display formatting for condition documents.
//!
//! These functions power the rule cards of the explorer's admin surface, where
//! the settings document can originate from partially-validated backend data.
//! The contract is therefore total: any JSON input produces a (possibly empty)
//! string, and malformed fragments silently contribute nothing. The strict
//! counterpart lives in [`strict`].

pub mod strict;

use ledgerscope_types::Operator;
use serde_json::Value;

/// Render one field's operator clause as display fragments.
///
/// Each `(operator, value)` entry becomes `"<field> <word> <value>"`, joined
/// with `" and "`. Unrecognized operator symbols pass through literally. A
/// clause that is not an object renders as the empty string.
pub fn format_condition(field: &str, clause: &Value) -> String {
    let Some(entries) = clause.as_object() else {
        return String::new();
    };

    let fragments: Vec<String> = entries
        .iter()
        .map(|(symbol, value)| {
            let word = Operator::from_symbol(symbol)
                .map(|op| op.word())
                .unwrap_or(symbol.as_str());
            format!("{} {} {}", field, word, render_value(value))
        })
        .collect();

    fragments.join(" and ")
}

/// Render a full condition document as one boolean expression string.
///
/// Field comparisons at the same level are AND-ed in document order; the
/// reserved `$or` key introduces a parenthesized disjunction and may nest to
/// arbitrary depth. Input that is not an object renders as the empty string.
pub fn parse_conditions(node: &Value) -> String {
    let Some(entries) = node.as_object() else {
        return String::new();
    };

    let mut fragments = Vec::new();
    for (key, value) in entries {
        if key == "$or" {
            if let Some(branches) = value.as_array() {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(parse_conditions)
                    .filter(|branch| !branch.is_empty())
                    .collect();
                if !rendered.is_empty() {
                    fragments.push(format!("({})", rendered.join(" OR ")));
                }
                continue;
            }
            // "$or" without an array falls through and is treated as an
            // ordinary field comparison, matching the stored-rule behavior
        }
        if value.is_object() {
            let fragment = format_condition(key, value);
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
    }

    fragments.join(" AND ")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_scalar).collect();
            format!("[{}]", rendered.join(", "))
        }
        other => render_scalar(other),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_clause() {
        assert_eq!(
            format_condition("currency", &json!({ "$eq": "USD" })),
            "currency is USD"
        );
    }

    #[test]
    fn test_operator_words() {
        assert_eq!(format_condition("v", &json!({ "$ne": 1 })), "v is not 1");
        assert_eq!(format_condition("v", &json!({ "$gt": 1 })), "v > 1");
        assert_eq!(format_condition("v", &json!({ "$gte": 1 })), "v >= 1");
        assert_eq!(format_condition("v", &json!({ "$lt": 1 })), "v < 1");
        assert_eq!(format_condition("v", &json!({ "$lte": 1 })), "v <= 1");
        assert_eq!(format_condition("v", &json!({ "$in": [1] })), "v in [1]");
        assert_eq!(format_condition("v", &json!({ "$nin": [1] })), "v not in [1]");
    }

    #[test]
    fn test_unknown_operator_passes_through() {
        assert_eq!(
            format_condition("amount", &json!({ "$mod": 5 })),
            "amount $mod 5"
        );
    }

    #[test]
    fn test_array_value_preserves_order() {
        assert_eq!(
            format_condition("code", &json!({ "$in": ["USD", "EUR", "JPY"] })),
            "code in [USD, EUR, JPY]"
        );
        assert_eq!(
            format_condition("n", &json!({ "$in": [3, 1, 2] })),
            "n in [3, 1, 2]"
        );
    }

    #[test]
    fn test_multiple_operators_in_one_clause() {
        assert_eq!(
            format_condition("amount", &json!({ "$gte": 10, "$lt": 100 })),
            "amount >= 10 and amount < 100"
        );
    }

    #[test]
    fn test_clause_guards() {
        assert_eq!(format_condition("a", &Value::Null), "");
        assert_eq!(format_condition("a", &json!(5)), "");
        assert_eq!(format_condition("a", &json!("text")), "");
    }

    #[test]
    fn test_non_object_documents() {
        assert_eq!(parse_conditions(&Value::Null), "");
        assert_eq!(parse_conditions(&json!({})), "");
        assert_eq!(parse_conditions(&json!("x")), "");
        assert_eq!(parse_conditions(&json!([1, 2])), "");
    }

    #[test]
    fn test_implicit_and() {
        let doc = json!({ "a": { "$eq": 1 }, "b": { "$gt": 2 } });
        assert_eq!(parse_conditions(&doc), "a is 1 AND b > 2");
    }

    #[test]
    fn test_or_branch() {
        let doc = json!({ "$or": [ { "a": { "$eq": 1 } }, { "b": { "$eq": 2 } } ] });
        assert_eq!(parse_conditions(&doc), "(a is 1 OR b is 2)");
    }

    #[test]
    fn test_nested_or() {
        let doc = json!({
            "$or": [
                { "a": { "$eq": 1 } },
                { "$or": [ { "b": { "$eq": 2 } }, { "c": { "$eq": 3 } } ] }
            ]
        });
        assert_eq!(parse_conditions(&doc), "(a is 1 OR (b is 2 OR c is 3))");
    }

    #[test]
    fn test_or_interleaved_with_fields() {
        let doc = json!({
            "event": { "$eq": "NFT_LISTED" },
            "$or": [
                { "amount": { "$gt": 100 } },
                { "currency": { "$in": ["USD", "EUR"] } }
            ],
            "seller": { "$ne": "rXYZ" }
        });
        assert_eq!(
            parse_conditions(&doc),
            "event is NFT_LISTED AND (amount > 100 OR currency in [USD, EUR]) AND seller is not rXYZ"
        );
    }

    #[test]
    fn test_empty_or_branches_are_dropped() {
        let doc = json!({ "$or": [ {}, "junk", null ] });
        assert_eq!(parse_conditions(&doc), "");

        let doc = json!({ "$or": [ {}, { "a": { "$eq": 1 } } ] });
        assert_eq!(parse_conditions(&doc), "(a is 1)");
    }

    #[test]
    fn test_malformed_members_contribute_nothing() {
        let doc = json!({ "a": 5, "b": { "$eq": 1 }, "c": null });
        assert_eq!(parse_conditions(&doc), "b is 1");
    }

    #[test]
    fn test_scalar_coercions() {
        assert_eq!(format_condition("ok", &json!({ "$eq": true })), "ok is true");
        assert_eq!(format_condition("x", &json!({ "$eq": 1.5 })), "x is 1.5");
        assert_eq!(format_condition("x", &json!({ "$eq": null })), "x is null");
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let doc = json!({ "a": { "$eq": 1 }, "$or": [ { "b": { "$gt": 2 } } ] });
        let first = parse_conditions(&doc);
        let second = parse_conditions(&doc);
        assert_eq!(first, second);
        assert_eq!(first, "a is 1 AND (b > 2)");
    }
}
