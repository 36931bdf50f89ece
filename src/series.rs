// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::table::{Record, Table};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    Throughput,
    TailLatency,
}

impl Metric {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::Throughput => record.throughput(),
            Metric::TailLatency => record.tail_latency(),
        }
    }
}

/// The points for one scenario, ascending by concurrency.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    scenario: String,
    points: Vec<(u32, f64)>,
}

impl Series {
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn points(&self) -> &[(u32, f64)] {
        &self.points
    }
}

/// Group the records of `table` by scenario, in first-seen order, and order
/// each group by concurrency. Records sharing a scenario and concurrency level
/// are all kept, in the order they appear in the table.
pub fn extract(table: &Table, metric: Metric) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();

    for record in table.records() {
        let point = (record.concurrency(), metric.value(record));
        match series.iter_mut().find(|s| s.scenario == record.scenario()) {
            Some(s) => s.points.push(point),
            None => series.push(Series {
                scenario: record.scenario().to_owned(),
                points: vec![point],
            }),
        }
    }

    for s in series.iter_mut() {
        // stable, so duplicates stay in encounter order
        s.points.sort_by_key(|(concurrency, _)| *concurrency);
    }

    series
}
