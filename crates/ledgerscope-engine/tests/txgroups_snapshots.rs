use ledgerscope_engine::summarize_tx_types;
use std::path::Path;

#[test]
fn test_hourly_snapshot_report() {
    let path = Path::new("tests/samples/mainnet_hour.json");

    if !path.exists() {
        eprintln!("Warning: Test file not found, skipping: {}", path.display());
        return;
    }

    let raw = std::fs::read_to_string(path).expect("Failed to read snapshot file");
    let counts = serde_json::from_str(&raw).expect("Failed to parse snapshot file");

    let model = summarize_tx_types(&counts);

    assert_eq!(model.total, 100, "fixture counts are chosen to sum to 100");

    let json = serde_json::to_string_pretty(&model).unwrap();
    insta::assert_snapshot!("tx_groups_report", json);
}
