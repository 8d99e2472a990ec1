//! Transaction-type classification and report-group aggregation.
//!
//! Raw snapshots arrive as a flat JSON object of transaction-type name to
//! count. Classification is two-tier: an exact registry first, then family
//! prefixes, so new subtypes introduced by the ledger protocol classify
//! without a code change while the curated list stays authoritative for
//! ambiguous short names.

use std::collections::HashMap;

use serde_json::Value;

use ledgerscope_types::{
    BaseBucket, TxGroupRank, TxGroupSummary, TxGroupsModel, TxTypeCount,
};

/// Registry of exact transaction-type names per base bucket.
/// Invariant: each name appears in at most one bucket.
const BUCKET_RULES: &[(BaseBucket, &[&str])] = &[
    (BaseBucket::Payments, &["Payment"]),
    (BaseBucket::Trustlines, &["TrustSet"]),
    (BaseBucket::Dex, &["OfferCreate", "OfferCancel"]),
    (
        BaseBucket::Amm,
        &["AMMCreate", "AMMDeposit", "AMMWithdraw", "AMMBid", "AMMVote"],
    ),
    (
        BaseBucket::Nft,
        &[
            "NFTokenMint",
            "NFTokenBurn",
            "NFTokenCreateOffer",
            "NFTokenAcceptOffer",
            "NFTokenCancelOffer",
            "NFTokenModify",
        ],
    ),
    (
        BaseBucket::Mptoken,
        &[
            "MPTokenAuthorize",
            "MPTokenIssuanceCreate",
            "MPTokenIssuanceDestroy",
            "MPTokenIssuanceSet",
        ],
    ),
    (BaseBucket::Checks, &["CheckCreate", "CheckCash", "CheckCancel"]),
    (BaseBucket::Escrow, &["EscrowCreate", "EscrowFinish", "EscrowCancel"]),
    (BaseBucket::Account, &["AccountSet", "AccountDelete"]),
];

/// Prefix fallbacks for names the registry does not list, checked in order
const PREFIX_RULES: &[(&str, BaseBucket)] = &[
    ("NFToken", BaseBucket::Nft),
    ("AMM", BaseBucket::Amm),
    ("MPToken", BaseBucket::Mptoken),
    ("Check", BaseBucket::Checks),
    ("Escrow", BaseBucket::Escrow),
];

/// Report group specification: one or more base buckets merged under a key/label
struct GroupSpec {
    key: &'static str,
    label: &'static str,
    buckets: &'static [BaseBucket],
}

impl GroupSpec {
    const fn new(key: &'static str, label: &'static str, buckets: &'static [BaseBucket]) -> Self {
        Self { key, label, buckets }
    }
}

/// Report groups in display order; `payments` merges the settlement-style buckets
const GROUPS: &[GroupSpec] = &[
    GroupSpec::new(
        "payments",
        "Payments",
        &[BaseBucket::Payments, BaseBucket::Checks, BaseBucket::Escrow],
    ),
    GroupSpec::new("trustlines", "Trust lines", &[BaseBucket::Trustlines]),
    GroupSpec::new("dex", "DEX", &[BaseBucket::Dex]),
    GroupSpec::new("amm", "AMM", &[BaseBucket::Amm]),
    GroupSpec::new("nft", "NFTs", &[BaseBucket::Nft]),
    GroupSpec::new("mptoken", "MPTokens", &[BaseBucket::Mptoken]),
    GroupSpec::new("account", "Account", &[BaseBucket::Account]),
    GroupSpec::new("other", "Other", &[BaseBucket::Other]),
];

/// Classify a transaction type into its base bucket.
///
/// Exact registry names win; unlisted names fall back to family prefixes,
/// and everything else lands in `Other`.
pub fn pick_base_bucket(tx_type: &str) -> BaseBucket {
    if let Some((bucket, _)) = BUCKET_RULES
        .iter()
        .find(|(_, names)| names.contains(&tx_type))
    {
        return *bucket;
    }

    for (prefix, bucket) in PREFIX_RULES {
        if tx_type.starts_with(prefix) {
            return *bucket;
        }
    }

    BaseBucket::Other
}

/// Aggregate a raw per-type count map into report groups with totals and shares.
///
/// Total over any input: a snapshot that is not a JSON object, and any entry
/// whose count does not coerce to a positive integer, contributes nothing.
/// The input is never mutated; identical input yields identical output.
pub fn build_tx_groups_model(transaction_types: &Value) -> TxGroupsModel {
    let Some(raw) = transaction_types.as_object() else {
        return TxGroupsModel::empty();
    };

    let mut entries: Vec<TxTypeCount> = raw
        .iter()
        .filter_map(|(tx_type, count)| {
            coerce_count(count).map(|count| TxTypeCount {
                tx_type: tx_type.clone(),
                count,
            })
        })
        .collect();

    // Stable sort: equal counts keep the snapshot's insertion order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    let mut total = 0u64;
    let mut by_bucket: HashMap<BaseBucket, Vec<TxTypeCount>> = HashMap::new();
    for entry in entries {
        total += entry.count;
        by_bucket
            .entry(pick_base_bucket(&entry.tx_type))
            .or_default()
            .push(entry);
    }

    let mut groups = Vec::new();
    for spec in GROUPS {
        let mut types: Vec<TxTypeCount> = spec
            .buckets
            .iter()
            .filter_map(|bucket| by_bucket.get(bucket))
            .flat_map(|list| list.iter().cloned())
            .collect();
        types.sort_by(|a, b| b.count.cmp(&a.count));

        let group_total: u64 = types.iter().map(|t| t.count).sum();
        if group_total == 0 {
            continue;
        }

        groups.push(TxGroupSummary {
            key: spec.key.to_string(),
            label: spec.label.to_string(),
            total: group_total,
            pct_of_all: pct(group_total, total),
            types,
        });
    }

    let mut ranked: Vec<&TxGroupSummary> = groups.iter().collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    let top_groups = ranked
        .into_iter()
        .take(3)
        .map(|group| TxGroupRank {
            key: group.key.clone(),
            label: group.label.clone(),
            total: group.total,
            pct_of_all: group.pct_of_all,
        })
        .collect();

    TxGroupsModel {
        total,
        groups,
        top_groups,
    }
}

fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Coerce a raw count to a positive integer; anything else contributes nothing
fn coerce_count(value: &Value) -> Option<u64> {
    let count = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (count > 0).then_some(count)
}
