// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Benchmark result tables and the two places they come from: a CSV file
//! produced by a benchmark run, or the built-in illustrative table.

use crate::error::{Error, Result};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde_derive::{Deserialize, Serialize};

use std::path::Path;

/// A single measurement: one scenario at one concurrency level.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "Threads")]
    concurrency: u32,
    #[serde(rename = "QPS")]
    throughput: f64,
    #[serde(rename = "P99_Latency_us")]
    tail_latency: f64,
}

impl Record {
    pub fn new(
        scenario: impl Into<String>,
        concurrency: u32,
        throughput: f64,
        tail_latency: f64,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            concurrency,
            throughput,
            tail_latency,
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn concurrency(&self) -> u32 {
        self.concurrency
    }

    /// requests per second
    pub fn throughput(&self) -> f64 {
        self.throughput
    }

    /// p99 latency in microseconds
    pub fn tail_latency(&self) -> f64 {
        self.tail_latency
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load a table from a CSV file with a `Scenario,Threads,QPS,P99_Latency_us`
    /// header. Additional columns are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInputFile {
                path: path.to_path_buf(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;

        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        debug!("loaded {} records from {}", records.len(), path.display());

        Ok(Self { records })
    }

    /// The hand-authored comparison table. These numbers are illustrative and
    /// were never measured.
    pub fn illustrative() -> Self {
        let threads = [1, 4, 8, 16];
        let scenarios: [(&str, [f64; 4], [f64; 4]); 3] = [
            (
                "StdMap+Mutex",
                [1_200_000.0, 950_000.0, 850_000.0, 800_000.0],
                [1.7, 45.2, 85.5, 150.3],
            ),
            (
                "FlashCache(MinKV)",
                [1_050_000.0, 3_200_000.0, 4_800_000.0, 5_500_000.0],
                [2.1, 5.5, 12.3, 18.5],
            ),
            (
                "Redis(Local)",
                [100_000.0, 100_000.0, 100_000.0, 100_000.0],
                [200.0, 200.0, 200.0, 200.0],
            ),
        ];

        let mut records = Vec::with_capacity(threads.len() * scenarios.len());
        for (scenario, qps, p99) in scenarios.iter() {
            for (i, t) in threads.iter().enumerate() {
                records.push(Record::new(*scenario, *t, qps[i], p99[i]));
            }
        }

        Self { records }
    }

    /// Write the table back out in the same CSV layout `load` reads.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct scenario labels in the order they are first seen.
    pub fn scenarios(&self) -> Vec<&str> {
        let mut scenarios: Vec<&str> = Vec::new();
        for record in &self.records {
            if !scenarios.contains(&record.scenario()) {
                scenarios.push(record.scenario());
            }
        }
        scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark_results.csv");
        match Table::load(&path) {
            Err(Error::MissingInputFile { path: missing }) => assert_eq!(missing, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn load_with_whitespace_and_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "results.csv",
            "Scenario, Threads, QPS, P99_Latency_us, Hit_Rate\n\
             MinKV, 1, 1050000, 2.1, 0.99\n\
             MinKV, 4, 3200000.5, 5.5, 0.98\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0], Record::new("MinKV", 1, 1_050_000.0, 2.1));
        assert_eq!(table.records()[1].throughput(), 3_200_000.5);
        assert_eq!(table.records()[1].tail_latency(), 5.5);
    }

    #[test]
    fn load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "results.csv",
            "Scenario,Threads,QPS,P99_Latency_us\nMinKV,many,1,2\n",
        );

        assert!(matches!(Table::load(&path), Err(Error::Csv(_))));
    }

    #[test]
    fn illustrative_table() {
        let table = Table::illustrative();
        assert_eq!(table.len(), 12);
        assert_eq!(
            table.scenarios(),
            vec!["StdMap+Mutex", "FlashCache(MinKV)", "Redis(Local)"]
        );
        assert_eq!(
            table.records()[7],
            Record::new("FlashCache(MinKV)", 16, 5_500_000.0, 18.5)
        );
    }

    #[test]
    fn export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.csv");
        let table = Table::illustrative();
        table.write_csv(&path).unwrap();

        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("Scenario,Threads,QPS,P99_Latency_us\n"));
        assert_eq!(Table::load(&path).unwrap(), table);
    }

    #[test]
    fn scenarios_first_seen() {
        let table = Table::new(vec![
            Record::new("B", 4, 1.0, 1.0),
            Record::new("A", 1, 1.0, 1.0),
            Record::new("B", 1, 1.0, 1.0),
        ]);
        assert_eq!(table.scenarios(), vec!["B", "A"]);
    }
}
