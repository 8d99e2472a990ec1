//! Strict parsing and evaluation of condition documents.
//!
//! The display path ([`parse_conditions`](super::parse_conditions)) is total
//! and silently drops malformed fragments. Rule matching needs the opposite
//! contract: a document that does not conform to the grammar is an explicit
//! error, never a silently weakened match.

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::{Error, Result};
use ledgerscope_types::{ConditionNode, ConditionValue, Operator, OperatorClause, ScalarValue};

/// Parse a raw condition document into a typed tree, rejecting anything the
/// grammar does not cover.
pub fn parse_document(node: &Value) -> Result<ConditionNode> {
    let Some(entries) = node.as_object() else {
        return Err(Error::Condition(format!(
            "condition document must be an object, got {}",
            json_kind(node)
        )));
    };

    let mut members = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if key == "$or" {
            let branches = value.as_array().ok_or_else(|| {
                Error::Condition("$or must hold an array of sub-conditions".to_string())
            })?;
            let parsed = branches
                .iter()
                .map(parse_document)
                .collect::<Result<Vec<_>>>()?;
            members.push(ConditionNode::Any(parsed));
        } else {
            members.push(ConditionNode::Compare {
                field: key.clone(),
                clause: parse_clause(key, value)?,
            });
        }
    }

    Ok(ConditionNode::All(members))
}

fn parse_clause(field: &str, clause: &Value) -> Result<OperatorClause> {
    let Some(entries) = clause.as_object() else {
        return Err(Error::Condition(format!(
            "clause for field '{}' must be an object of operators, got {}",
            field,
            json_kind(clause)
        )));
    };

    let mut parsed = Vec::with_capacity(entries.len());
    for (symbol, value) in entries {
        let op = Operator::from_symbol(symbol).ok_or_else(|| {
            Error::Condition(format!(
                "unknown operator '{}' for field '{}'",
                symbol, field
            ))
        })?;
        parsed.push((op, parse_value(field, op, value)?));
    }

    Ok(OperatorClause { entries: parsed })
}

fn parse_value(field: &str, op: Operator, value: &Value) -> Result<ConditionValue> {
    match op {
        Operator::In | Operator::Nin => {
            let items = value.as_array().ok_or_else(|| {
                Error::Condition(format!(
                    "{} for field '{}' requires an array value",
                    op.symbol(),
                    field
                ))
            })?;
            let scalars = items
                .iter()
                .map(|item| parse_scalar(field, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(ConditionValue::List(scalars))
        }
        _ => Ok(ConditionValue::Scalar(parse_scalar(field, value)?)),
    }
}

fn parse_scalar(field: &str, value: &Value) -> Result<ScalarValue> {
    match value {
        Value::String(s) => Ok(ScalarValue::Str(s.clone())),
        Value::Bool(b) => Ok(ScalarValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(ScalarValue::Num).ok_or_else(|| {
            Error::Condition(format!("field '{}' has a non-finite numeric value", field))
        }),
        other => Err(Error::Condition(format!(
            "field '{}' has a non-scalar comparison value: {}",
            field,
            json_kind(other)
        ))),
    }
}

/// Evaluate a typed condition tree against an event payload.
///
/// Field lookups are top-level keys of the event object. A missing field
/// satisfies `Ne` and `Nin` (absence is "not equal") and fails every other
/// operator.
pub fn matches(node: &ConditionNode, event: &Value) -> bool {
    match node {
        ConditionNode::All(members) => members.iter().all(|member| matches(member, event)),
        ConditionNode::Any(branches) => branches.iter().any(|branch| matches(branch, event)),
        ConditionNode::Compare { field, clause } => {
            let actual = event.get(field);
            clause
                .entries
                .iter()
                .all(|(op, expected)| compare(*op, actual, expected))
        }
    }
}

fn compare(op: Operator, actual: Option<&Value>, expected: &ConditionValue) -> bool {
    match (op, expected) {
        (Operator::Eq, ConditionValue::Scalar(want)) => {
            actual.is_some_and(|value| scalar_eq(value, want))
        }
        (Operator::Ne, ConditionValue::Scalar(want)) => {
            actual.is_none_or(|value| !scalar_eq(value, want))
        }
        (Operator::In, ConditionValue::List(items)) => {
            actual.is_some_and(|value| items.iter().any(|item| scalar_eq(value, item)))
        }
        (Operator::Nin, ConditionValue::List(items)) => {
            actual.is_none_or(|value| !items.iter().any(|item| scalar_eq(value, item)))
        }
        (Operator::Gt, ConditionValue::Scalar(want)) => {
            ordering(actual, want).is_some_and(Ordering::is_gt)
        }
        (Operator::Gte, ConditionValue::Scalar(want)) => {
            ordering(actual, want).is_some_and(Ordering::is_ge)
        }
        (Operator::Lt, ConditionValue::Scalar(want)) => {
            ordering(actual, want).is_some_and(Ordering::is_lt)
        }
        (Operator::Lte, ConditionValue::Scalar(want)) => {
            ordering(actual, want).is_some_and(Ordering::is_le)
        }
        // Arity mismatches cannot come out of parse_document
        _ => false,
    }
}

fn scalar_eq(actual: &Value, want: &ScalarValue) -> bool {
    match want {
        ScalarValue::Str(s) => actual.as_str() == Some(s.as_str()),
        ScalarValue::Num(n) => actual.as_f64() == Some(*n),
        ScalarValue::Bool(b) => actual.as_bool() == Some(*b),
    }
}

/// Ordering of the event value against the expected scalar: numeric when both
/// sides are numbers, lexicographic when both are strings, undefined otherwise
fn ordering(actual: Option<&Value>, want: &ScalarValue) -> Option<Ordering> {
    let actual = actual?;
    match want {
        ScalarValue::Num(n) => actual.as_f64().and_then(|a| a.partial_cmp(n)),
        ScalarValue::Str(s) => actual.as_str().map(|a| a.cmp(s.as_str())),
        ScalarValue::Bool(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object_document() {
        assert!(parse_document(&json!(null)).is_err());
        assert!(parse_document(&json!([1])).is_err());
        assert!(parse_document(&json!("x")).is_err());
    }

    #[test]
    fn test_rejects_or_without_array() {
        let err = parse_document(&json!({ "$or": { "a": { "$eq": 1 } } })).unwrap_err();
        assert!(matches!(err, Error::Condition(_)));
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let err = parse_document(&json!({ "a": { "$regex": "^r" } })).unwrap_err();
        assert!(matches!(err, Error::Condition(_)));
    }

    #[test]
    fn test_rejects_scalar_clause() {
        assert!(parse_document(&json!({ "a": 5 })).is_err());
        assert!(parse_document(&json!({ "a": null })).is_err());
    }

    #[test]
    fn test_rejects_membership_without_array() {
        let err = parse_document(&json!({ "a": { "$in": "USD" } })).unwrap_err();
        assert!(matches!(err, Error::Condition(_)));
    }

    #[test]
    fn test_empty_document_is_vacuously_true() {
        let node = parse_document(&json!({})).unwrap();
        assert!(matches(&node, &json!({ "anything": 1 })));
    }

    #[test]
    fn test_display_agrees_with_lossy_formatter() {
        let doc = json!({
            "event": { "$eq": "NFT_LISTED" },
            "$or": [
                { "amount": { "$gt": 100 } },
                { "currency": { "$in": ["USD", "EUR"] } }
            ]
        });

        let node = parse_document(&doc).unwrap();
        assert_eq!(node.to_string(), super::super::parse_conditions(&doc));
    }

    #[test]
    fn test_eq_and_in_matching() {
        let node = parse_document(&json!({
            "status": { "$eq": "active" },
            "currency": { "$in": ["USD", "EUR"] }
        }))
        .unwrap();

        assert!(matches(&node, &json!({ "status": "active", "currency": "EUR" })));
        assert!(!matches(&node, &json!({ "status": "active", "currency": "JPY" })));
        assert!(!matches(&node, &json!({ "status": "closed", "currency": "USD" })));
    }

    #[test]
    fn test_numeric_ordering() {
        let node = parse_document(&json!({ "amount": { "$gte": 10, "$lt": 100 } })).unwrap();

        assert!(matches(&node, &json!({ "amount": 10 })));
        assert!(matches(&node, &json!({ "amount": 99.5 })));
        assert!(!matches(&node, &json!({ "amount": 100 })));
        assert!(!matches(&node, &json!({ "amount": 9 })));
        // Non-numeric event value cannot be ordered
        assert!(!matches(&node, &json!({ "amount": "10" })));
    }

    #[test]
    fn test_or_evaluation() {
        let node = parse_document(&json!({
            "$or": [
                { "a": { "$eq": 1 } },
                { "b": { "$eq": 2 } }
            ]
        }))
        .unwrap();

        assert!(matches(&node, &json!({ "a": 1 })));
        assert!(matches(&node, &json!({ "b": 2 })));
        assert!(!matches(&node, &json!({ "a": 2, "b": 1 })));
    }

    #[test]
    fn test_missing_field_semantics() {
        let ne = parse_document(&json!({ "seller": { "$ne": "rXYZ" } })).unwrap();
        assert!(matches(&ne, &json!({})));
        assert!(matches(&ne, &json!({ "seller": "rABC" })));
        assert!(!matches(&ne, &json!({ "seller": "rXYZ" })));

        let nin = parse_document(&json!({ "code": { "$nin": ["USD"] } })).unwrap();
        assert!(matches(&nin, &json!({})));

        let eq = parse_document(&json!({ "code": { "$eq": "USD" } })).unwrap();
        assert!(!matches(&eq, &json!({})));

        let gt = parse_document(&json!({ "amount": { "$gt": 1 } })).unwrap();
        assert!(!matches(&gt, &json!({})));
    }
}
