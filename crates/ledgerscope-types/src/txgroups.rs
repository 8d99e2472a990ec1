use serde::{Deserialize, Serialize};

/// Finest-grained classification of a transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseBucket {
    Payments,
    Trustlines,
    Dex,
    Amm,
    Nft,
    Mptoken,
    Checks,
    Escrow,
    Account,
    Other,
}

impl BaseBucket {
    pub fn key(&self) -> &'static str {
        match self {
            BaseBucket::Payments => "payments",
            BaseBucket::Trustlines => "trustlines",
            BaseBucket::Dex => "dex",
            BaseBucket::Amm => "amm",
            BaseBucket::Nft => "nft",
            BaseBucket::Mptoken => "mptoken",
            BaseBucket::Checks => "checks",
            BaseBucket::Escrow => "escrow",
            BaseBucket::Account => "account",
            BaseBucket::Other => "other",
        }
    }
}

/// One transaction type with its observed count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxTypeCount {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub count: u64,
}

/// User-facing report group: merged base buckets with total and share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxGroupSummary {
    pub key: String,
    pub label: String,
    pub total: u64,
    pub pct_of_all: f64,
    /// Member types, sorted by count descending
    pub types: Vec<TxTypeCount>,
}

/// Ranked projection of a report group (no per-type breakdown)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxGroupRank {
    pub key: String,
    pub label: String,
    pub total: u64,
    pub pct_of_all: f64,
}

/// Aggregated activity model for one count-map snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxGroupsModel {
    /// Sum of all positive counts across all classified types
    pub total: u64,
    /// Non-empty groups in report order
    pub groups: Vec<TxGroupSummary>,
    /// Top 3 groups by total, descending
    pub top_groups: Vec<TxGroupRank>,
}

impl TxGroupsModel {
    pub fn empty() -> Self {
        TxGroupsModel {
            total: 0,
            groups: Vec::new(),
            top_groups: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_serde_names() {
        let bucket: BaseBucket = serde_json::from_str("\"trustlines\"").unwrap();
        assert_eq!(bucket, BaseBucket::Trustlines);
        assert_eq!(serde_json::to_string(&BaseBucket::Mptoken).unwrap(), "\"mptoken\"");
        assert_eq!(BaseBucket::Nft.key(), "nft");
    }

    #[test]
    fn test_tx_type_count_wire_name() {
        let entry = TxTypeCount {
            tx_type: "Payment".to_string(),
            count: 4,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Payment");
        assert_eq!(json["count"], 4);
    }
}
