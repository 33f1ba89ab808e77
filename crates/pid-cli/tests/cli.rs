use std::fs;
use std::process::Command;

fn sample_document() -> &'static str {
    r#"{
        "nodes": [
            {"id": "a", "type": "equipment", "centroid": [5.0, 5.0], "bbox": [0.0, 0.0, 10.0, 10.0]},
            {"id": "b", "type": "equipment", "centroid": [45.0, 5.5], "bbox": [3.0, 40.0, 8.0, 50.0]}
        ],
        "links": [
            {"source": "a", "target": "b"}
        ],
        "graph": {"num_edges": 0, "num_isolated_nodes": 0}
    }"#
}

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_pid-cli")
}

#[test]
fn stats_reports_counts_for_a_sample_graph() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    fs::write(&input, sample_document()).unwrap();

    let output = Command::new(bin()).arg("stats").arg(&input).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("nodes: 2"));
    assert!(stdout.contains("edges: 1"));
}

#[test]
fn validate_passes_on_a_well_formed_graph() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    fs::write(&input, sample_document()).unwrap();

    let output = Command::new(bin()).arg("validate").arg(&input).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("boundary contact violations: 0"));
    assert!(stdout.contains("key canonicity violations: 0"));
}

#[test]
fn optimize_all_writes_an_output_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output_path = dir.path().join("out.json");
    fs::write(&input, sample_document()).unwrap();

    let output = Command::new(bin())
        .arg("optimize-all")
        .arg(&input)
        .arg(&output_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let saved = fs::read_to_string(&output_path).unwrap();
    assert!(saved.contains("\"num_edges\": 1"));
}
