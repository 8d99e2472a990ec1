use serde::{Deserialize, Serialize};
use std::fmt;

// NOTE: Condition Grammar
//
// A condition document is a conjunction of field comparisons with one reserved
// disjunction key:
//
//   { "currency": { "$eq": "USD" }, "$or": [ { "amount": { "$gt": 100 } }, ... ] }
//
// - Every key at a given level is AND-ed with its siblings.
// - The reserved key "$or" holds an ordered list of sub-documents, any of which
//   may satisfy the branch. "$or" branches nest to arbitrary depth.
// - There is no "$and" and no "$not"; stored rules rely on exactly this shape,
//   so the typed model mirrors it rather than extending it.

/// Comparison operator recognized inside an operator clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
}

impl Operator {
    /// Parse the `$`-prefixed wire symbol (`"$eq"`, `"$nin"`, ...)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "$eq" => Some(Operator::Eq),
            "$ne" => Some(Operator::Ne),
            "$gt" => Some(Operator::Gt),
            "$gte" => Some(Operator::Gte),
            "$lt" => Some(Operator::Lt),
            "$lte" => Some(Operator::Lte),
            "$in" => Some(Operator::In),
            "$nin" => Some(Operator::Nin),
            _ => None,
        }
    }

    /// The `$`-prefixed wire symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
        }
    }

    /// The fixed word used when rendering a condition for display
    pub fn word(&self) -> &'static str {
        match self {
            Operator::Eq => "is",
            Operator::Ne => "is not",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "in",
            Operator::Nin => "not in",
        }
    }
}

/// Scalar comparison value
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Str(s) => write!(f, "{}", s),
            ScalarValue::Num(n) => write!(f, "{}", n),
            ScalarValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Comparison value: a scalar for the ordering/equality operators, a list for
/// the membership operators
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Scalar(ScalarValue),
    List(Vec<ScalarValue>),
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Scalar(scalar) => write!(f, "{}", scalar),
            ConditionValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// One field's comparisons, in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperatorClause {
    pub entries: Vec<(Operator, ConditionValue)>,
}

/// Typed view of a condition document
///
/// Constructed by the engine's strict parser; rendering via `Display` produces
/// the same grammar as the lossy display formatter, so both paths agree on
/// well-formed input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    /// Implicit AND over members (one per document key)
    All(Vec<ConditionNode>),
    /// `$or` disjunction over branches
    Any(Vec<ConditionNode>),
    /// A single field compared through an operator clause
    Compare {
        field: String,
        clause: OperatorClause,
    },
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::All(members) => {
                let rendered: Vec<String> = members
                    .iter()
                    .map(|member| member.to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                write!(f, "{}", rendered.join(" AND "))
            }
            ConditionNode::Any(branches) => {
                let rendered: Vec<String> = branches
                    .iter()
                    .map(|branch| branch.to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if rendered.is_empty() {
                    Ok(())
                } else {
                    write!(f, "({})", rendered.join(" OR "))
                }
            }
            ConditionNode::Compare { field, clause } => {
                let rendered: Vec<String> = clause
                    .entries
                    .iter()
                    .map(|(op, value)| format!("{} {} {}", field, op.word(), value))
                    .collect();
                write!(f, "{}", rendered.join(" and "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        let ops = [
            Operator::Eq,
            Operator::Ne,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
            Operator::In,
            Operator::Nin,
        ];
        for op in ops {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol("$regex"), None);
        assert_eq!(Operator::from_symbol("eq"), None);
    }

    #[test]
    fn test_operator_words() {
        assert_eq!(Operator::Eq.word(), "is");
        assert_eq!(Operator::Ne.word(), "is not");
        assert_eq!(Operator::Gte.word(), ">=");
        assert_eq!(Operator::Nin.word(), "not in");
    }

    #[test]
    fn test_node_display() {
        let node = ConditionNode::All(vec![
            ConditionNode::Compare {
                field: "a".to_string(),
                clause: OperatorClause {
                    entries: vec![(Operator::Eq, ConditionValue::Scalar(ScalarValue::Num(1.0)))],
                },
            },
            ConditionNode::Any(vec![
                ConditionNode::All(vec![ConditionNode::Compare {
                    field: "b".to_string(),
                    clause: OperatorClause {
                        entries: vec![(
                            Operator::In,
                            ConditionValue::List(vec![
                                ScalarValue::Str("x".to_string()),
                                ScalarValue::Str("y".to_string()),
                            ]),
                        )],
                    },
                }]),
                ConditionNode::All(vec![ConditionNode::Compare {
                    field: "c".to_string(),
                    clause: OperatorClause {
                        entries: vec![(Operator::Gt, ConditionValue::Scalar(ScalarValue::Num(2.0)))],
                    },
                }]),
            ]),
        ]);

        assert_eq!(node.to_string(), "a is 1 AND (b in [x, y] OR c > 2)");
    }

    #[test]
    fn test_empty_disjunction_renders_nothing() {
        let node = ConditionNode::All(vec![ConditionNode::Any(vec![])]);
        assert_eq!(node.to_string(), "");
    }
}
