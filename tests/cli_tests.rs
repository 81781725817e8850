//! Command-Line Interface Tests
//!
//! Drives the `probe-matcher` binary end to end: probe table ingestion,
//! target input variants, every output format and error reporting.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DEMO_PROBES: &str = "Probe_Name,Sequence\nProbe_5to3,GCGT\nProbe_3to5,ACGC\nProbe_NoMatch,TTTT\n";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(content.as_bytes()).expect("write file");
    path
}

fn probe_matcher() -> Command {
    Command::cargo_bin("probe-matcher").expect("binary built")
}

#[test]
fn test_search_demo_csv_output() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher()
        .args(["search", "--sequence", "ATGCGT", "--format", "csv"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(
            "Probe_Name,Match_Type,Start_Position,End_Position,Matched_Sequence\n\
             Probe_5to3,5'→3',3,6,GCGT\n\
             Probe_3to5,3'→5',3,6,GCGT\n",
        );
}

#[test]
fn test_search_text_output() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher()
        .args(["search", "-s", "atgcgt"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 match(es)"))
        .stdout(predicate::str::contains("gcgt"))
        .stdout(predicate::str::contains("No matches for: Probe_NoMatch"));
}

#[test]
fn test_search_json_output() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    let output = probe_matcher()
        .args(["--format", "json", "search", "--sequence", "ATGCGT"])
        .arg(&probes)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total_matches"], 2);
    assert_eq!(json["matches"][0]["probe_name"], "Probe_5to3");
    assert_eq!(json["matches"][1]["orientation"], "reverse_complement");
    assert_eq!(json["matches"][1]["start"], 3);
}

#[test]
fn test_search_fasta_target_file_and_tsv_probes() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.tsv", "name\tsequence\nAA\tAA\n");
    let target = write_file(dir.path(), "target.fa", ">demo\nAA\nAA\n");

    probe_matcher()
        .args(["search", "--format", "tsv", "--target"])
        .arg(&target)
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("AA\t5'→3'\t1\t2\tAA\n"))
        .stdout(predicate::str::contains("AA\t5'→3'\t2\t3\tAA\n"))
        .stdout(predicate::str::contains("AA\t5'→3'\t3\t4\tAA\n"));
}

#[test]
fn test_search_target_from_stdin() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", "pal,ACGT\n");

    probe_matcher()
        .args(["search", "--format", "csv", "--target", "-"])
        .arg(&probes)
        .write_stdin("AC\nGT\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("pal,5'→3',1,4,ACGT"))
        .stdout(predicate::str::contains("3'→5'").not());
}

#[test]
fn test_search_saves_results_file() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);
    let output = dir.path().join("probe_matches.csv");

    probe_matcher()
        .args(["search", "--sequence", "ATGCGT", "--output"])
        .arg(&output)
        .arg(&probes)
        .assert()
        .success();

    let saved = std::fs::read_to_string(&output).unwrap();
    assert_eq!(saved.lines().count(), 3);
    assert!(saved.starts_with("Probe_Name,Match_Type,Start_Position,End_Position,Matched_Sequence"));
}

#[test]
fn test_search_saves_results_file_default_name() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher()
        .current_dir(dir.path())
        .args(["search", "--sequence", "ATGCGT"])
        .arg(&probes)
        .arg("--output")
        .assert()
        .success();

    let saved = std::fs::read_to_string(dir.path().join("probe_matches.csv")).unwrap();
    assert_eq!(saved.lines().count(), 3);
    assert!(saved.contains("Probe_3to5,3'→5',3,6,GCGT"));
}

#[test]
fn test_search_keeps_hash_named_probes() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", "# plate 2\n#12,GCGT\n");

    probe_matcher()
        .args(["search", "--sequence", "ATGCGT", "--format", "csv"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("#12,"))
        .stdout(predicate::str::contains("3,6,GCGT"));
}

#[test]
fn test_search_skips_invalid_probe_rows() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", "good,GCGT\nbad,GCNT\n");

    probe_matcher()
        .args(["search", "--sequence", "ATGCGT", "--format", "csv"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("good,5'→3',3,6,GCGT"))
        .stderr(predicate::str::contains("skipped 1 probe row(s)"));
}

#[test]
fn test_search_strict_rejects_invalid_probe_rows() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", "good,GCGT\nbad,GCNT\n");

    probe_matcher()
        .args(["search", "--strict", "--sequence", "ATGCGT"])
        .arg(&probes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"))
        .stderr(predicate::str::contains("Invalid base 'N' at position 3"));
}

#[test]
fn test_search_invalid_target() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher()
        .args(["search", "--sequence", "ATGNGT"])
        .arg(&probes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base 'N' at position 4"));
}

#[test]
fn test_search_empty_target_warns() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);
    let target = write_file(dir.path(), "empty.txt", "\n");

    probe_matcher()
        .args(["search", "--target"])
        .arg(&target)
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found"))
        .stderr(predicate::str::contains("target sequence is empty"));
}

#[test]
fn test_search_requires_target() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher().arg("search").arg(&probes).assert().failure();
}

#[test]
fn test_search_forward_strand_only() {
    let dir = TempDir::new().unwrap();
    let probes = write_file(dir.path(), "probes.csv", DEMO_PROBES);

    probe_matcher()
        .args(["search", "--strands", "forward", "--sequence", "ATGCGT", "--format", "csv"])
        .arg(&probes)
        .assert()
        .success()
        .stdout(predicate::str::contains("Probe_5to3"))
        .stdout(predicate::str::contains("Probe_3to5").not());
}

#[test]
fn test_revcomp() {
    probe_matcher()
        .args(["revcomp", "GCGT", "gattaca"])
        .assert()
        .success()
        .stdout("ACGC\nTGTAATC\n");
}

#[test]
fn test_revcomp_invalid() {
    probe_matcher()
        .args(["revcomp", "ACGU"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base 'U' at position 4"));
}
