// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use std::fs;
use std::path::PathBuf;

fn paramgraph() -> Command {
    Command::cargo_bin("paramgraph").unwrap()
}

fn write_results(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const SWEEP_N: &str = r#"{"results": [
    {"parameters": {"n": 1}, "mean": 0.5, "stddev": 0.1},
    {"parameters": {"n": 2}, "mean": 1.0, "stddev": 0.2}
]}"#;

const SWEEP_M: &str = r#"{"results": [
    {"parameters": {"m": 1}, "mean": 0.5, "stddev": 0.1}
]}"#;

#[test]
fn renders_a_single_file_sweep() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "n.json", SWEEP_N);
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let rendered = fs::read_to_string(&output).unwrap();
    assert!(rendered.contains("Time [s]"));
    // the text node content may sit on its own line inside the element
    assert!(rendered.lines().any(|line| line.trim() == "n"));
}

#[test]
fn renders_string_parameter_values() {
    let dir = TempDir::new().unwrap();
    let input = write_results(
        &dir,
        "delay.json",
        r#"{"results": [
            {"parameters": {"delay": "0.5"}, "mean": 0.5, "stddev": 0.01},
            {"parameters": {"delay": "1"}, "mean": 1.0, "stddev": 0.01}
        ]}"#,
    );
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn log_axes_render() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "n.json", SWEEP_N);
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&input)
        .arg("--log-x")
        .arg("--log-time")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn titles_produce_a_legend() {
    let dir = TempDir::new().unwrap();
    let first = write_results(&dir, "a.json", SWEEP_N);
    let second = write_results(&dir, "b.json", SWEEP_N);
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&first)
        .arg(&second)
        .arg("--titles")
        .arg("Alpha,Beta")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let rendered = fs::read_to_string(&output).unwrap();
    assert!(rendered.contains("Alpha"));
    assert!(rendered.contains("Beta"));
}

#[test]
fn empty_titles_draw_no_legend() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "n.json", SWEEP_N);
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&input)
        .arg("--titles")
        .arg("")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    // no legend label means no text node holding an empty string
    let rendered = fs::read_to_string(&output).unwrap();
    assert!(!rendered.contains("<text></text>"));
}

#[test]
fn fails_when_files_disagree_on_parameter_name() {
    let dir = TempDir::new().unwrap();
    let first = write_results(&dir, "n.json", SWEEP_N);
    let second = write_results(&dir, "m.json", SWEEP_M);

    paramgraph()
        .arg(&first)
        .arg(&second)
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("fatal:")
                .and(predicate::str::contains("\"n\""))
                .and(predicate::str::contains("\"m\"")),
        );
}

#[test]
fn fails_on_empty_results() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "empty.json", r#"{"results": []}"#);

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: no benchmark data to plot"));
}

#[test]
fn fails_on_entry_without_parameters() {
    let dir = TempDir::new().unwrap();
    let input = write_results(
        &dir,
        "bare.json",
        r#"{"results": [{"mean": 0.5, "stddev": 0.1}]}"#,
    );

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("but found none"));
}

#[test]
fn fails_on_entry_with_multiple_parameters() {
    let dir = TempDir::new().unwrap();
    let input = write_results(
        &dir,
        "multi.json",
        r#"{"results": [{"parameters": {"n": 1, "m": 2}, "mean": 0.5, "stddev": 0.1}]}"#,
    );

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("but found multiple")
                .and(predicate::str::contains("\"m\", \"n\"")),
        );
}

#[test]
fn fails_on_mixed_parameter_names_within_a_file() {
    let dir = TempDir::new().unwrap();
    let input = write_results(
        &dir,
        "mixed.json",
        r#"{"results": [
            {"parameters": {"n": 1}, "mean": 0.5, "stddev": 0.1},
            {"parameters": {"m": 2}, "mean": 1.0, "stddev": 0.2}
        ]}"#,
    );

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "benchmarks must all have the same parameter name",
        ));
}

#[test]
fn fails_on_malformed_json() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "broken.json", "{not json");

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: unable to parse"));
}

#[test]
fn fails_on_missing_file() {
    paramgraph()
        .arg("no-such-file-5d9574198b7e4b12a71fa4747c0a577.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("fatal: unable to read"));
}

#[test]
fn fails_on_non_numeric_parameter_value() {
    let dir = TempDir::new().unwrap();
    let input = write_results(
        &dir,
        "nonnumeric.json",
        r#"{"results": [{"parameters": {"n": "huge"}, "mean": 0.5, "stddev": 0.1}]}"#,
    );

    paramgraph()
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not numeric"));
}

#[test]
fn parameter_name_flag_warns_but_is_ignored() {
    let dir = TempDir::new().unwrap();
    let input = write_results(&dir, "n.json", SWEEP_N);
    let output = dir.path().join("plot.svg");

    paramgraph()
        .arg(&input)
        .arg("--parameter-name")
        .arg("whatever")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("deprecated"));

    // the supplied name has no effect; the inferred one labels the axis
    let rendered = fs::read_to_string(&output).unwrap();
    assert!(!rendered.contains("whatever"));
}

#[test]
fn requires_at_least_one_file() {
    paramgraph().assert().failure();
}
