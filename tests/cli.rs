// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::Path;
use std::process::{Command, Output};

fn perfplot(dir: &Path, args: &[&str]) -> Output {
    let config = dir.join("perfplot.toml");
    std::fs::write(&config, "[general]\ndpi = 40\n").unwrap();

    Command::new(env!("CARGO_BIN_EXE_perfplot"))
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .unwrap()
}

fn error_lines(output: &Output) -> usize {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| line.contains(" ERROR "))
        .count()
}

fn png_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    files.sort();
    files
}

#[test]
fn missing_input_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = perfplot(
        dir.path(),
        &["--pipeline", "measured", "--input", "nope.csv", "--output-dir", "out"],
    );

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(error_lines(&output), 1, "{}", String::from_utf8_lossy(&output.stdout));
    assert!(String::from_utf8_lossy(&output.stdout).contains("nope.csv"));
    assert!(png_files(dir.path()).is_empty());
    assert!(png_files(&dir.path().join("out")).is_empty());
}

#[test]
fn missing_input_does_not_stop_other_pipelines() {
    let dir = tempfile::tempdir().unwrap();
    let output = perfplot(
        dir.path(),
        &["--pipeline", "all", "--input", "nope.csv", "--output-dir", "out"],
    );

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(error_lines(&output), 1, "{}", String::from_utf8_lossy(&output.stdout));
    assert_eq!(
        png_files(&dir.path().join("out")),
        vec!["demo_latency.png", "demo_qps.png", "performance_report.png"]
    );
}

#[test]
fn bad_config_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[general]\ndpi = 0\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_perfplot"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(png_files(dir.path()).is_empty());
}
