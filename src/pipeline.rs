// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The two chart pipelines: results measured by a benchmark run, and the
//! built-in illustrative comparison.

use crate::chart::{
    plan, render, render_report, Canvas, ChartPlan, ChartStyle, Colour, Dash, Marker,
    ScenarioStyle, SeriesStyle, StyleSheet,
};
use crate::config::Config;
use crate::error::Result;
use crate::series::{extract, Metric};
use crate::table::Table;

use std::fmt;
use std::path::{Path, PathBuf};

const ILLUSTRATIVE_TICKS: [u32; 4] = [1, 4, 8, 16];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    /// results loaded from the configured CSV file
    Measured,
    /// the hand-authored table, not real measurements
    Illustrative,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Measured => write!(f, "measured"),
            Variant::Illustrative => write!(f, "illustrative"),
        }
    }
}

impl Variant {
    pub fn throughput_file(self) -> &'static str {
        match self {
            Variant::Measured => "benchmark_qps.png",
            Variant::Illustrative => "demo_qps.png",
        }
    }

    pub fn latency_file(self) -> &'static str {
        match self {
            Variant::Measured => "benchmark_latency.png",
            Variant::Illustrative => "demo_latency.png",
        }
    }

    pub fn report_file(self) -> &'static str {
        match self {
            Variant::Measured => "benchmark_report.png",
            Variant::Illustrative => "performance_report.png",
        }
    }

    /// The report is written for the illustrative pipeline unless turned off,
    /// and for the measured pipeline only when asked for.
    pub fn writes_report(self, config: &Config) -> bool {
        config
            .combined()
            .unwrap_or(self == Variant::Illustrative)
    }

    pub fn table(self, config: &Config) -> Result<Table> {
        match self {
            Variant::Measured => Table::load(config.input()),
            Variant::Illustrative => Ok(Table::illustrative()),
        }
    }

    /// Caption, axes and line styles for `metric` in this pipeline.
    pub fn chart_style(self, metric: Metric, config: &Config) -> ChartStyle {
        let mut style = ChartStyle::new();
        style.theme(config.theme());

        match (self, metric) {
            (Variant::Measured, Metric::Throughput) => {
                style
                    .caption("Throughput Comparison (Higher is Better)")
                    .y_desc("QPS (Queries Per Second)");
            }
            (Variant::Measured, Metric::TailLatency) => {
                style
                    .caption("P99 Latency Comparison (Lower is Better)")
                    .y_desc("Latency (microseconds)");
            }
            (Variant::Illustrative, Metric::Throughput) => {
                style
                    .caption("Throughput Scalability (QPS) (illustrative data)")
                    .y_desc("QPS (x10,000)")
                    .scale(10_000.0)
                    .x_ticks(ILLUSTRATIVE_TICKS.to_vec());
            }
            (Variant::Illustrative, Metric::TailLatency) => {
                style
                    .caption("P99 Latency (Lower is Better) (illustrative data)")
                    .y_desc("Latency (microseconds)")
                    .x_ticks(ILLUSTRATIVE_TICKS.to_vec());
            }
        }

        let mut sheet = StyleSheet::new(self.base_style(metric));
        sheet
            .extend(&self.scenario_styles())
            .extend(config.scenarios());
        style.styles(sheet);

        style
    }

    fn base_style(self, metric: Metric) -> SeriesStyle {
        match self {
            Variant::Measured => SeriesStyle {
                marker: match metric {
                    Metric::Throughput => Marker::Circle,
                    Metric::TailLatency => Marker::Square,
                },
                line_width: 2.0,
                marker_size: 6.0,
                ..Default::default()
            },
            Variant::Illustrative => SeriesStyle {
                line_width: 3.0,
                marker_size: 8.0,
                ..Default::default()
            },
        }
    }

    fn scenario_styles(self) -> Vec<ScenarioStyle> {
        match self {
            Variant::Measured => Vec::new(),
            Variant::Illustrative => vec![
                ScenarioStyle::new("StdMap+Mutex")
                    .colour(Colour(0x7f, 0x8c, 0x8d))
                    .marker(Marker::Circle)
                    .line(Dash::Dashed),
                ScenarioStyle::new("FlashCache(MinKV)")
                    .colour(Colour(0xc0, 0x39, 0x2b))
                    .marker(Marker::Triangle)
                    .line(Dash::Solid),
                ScenarioStyle::new("Redis(Local)")
                    .colour(Colour(0x29, 0x80, 0xb9))
                    .marker(Marker::Square)
                    .line(Dash::Dotted),
            ],
        }
    }

    /// The throughput and latency plans for `table`.
    pub fn plans(self, table: &Table, config: &Config) -> (ChartPlan, ChartPlan) {
        let throughput = plan(
            &extract(table, Metric::Throughput),
            &self.chart_style(Metric::Throughput, config),
        );
        let latency = plan(
            &extract(table, Metric::TailLatency),
            &self.chart_style(Metric::TailLatency, config),
        );
        (throughput, latency)
    }
}

/// Run one pipeline end to end and return the paths of the images written.
///
/// Nothing is written unless the table could be produced; a missing input file
/// is returned as `Error::MissingInputFile` for the caller to report.
pub fn run(variant: Variant, config: &Config) -> Result<Vec<PathBuf>> {
    let table = variant.table(config)?;
    if variant == Variant::Illustrative {
        warn!("illustrative pipeline: charts show hand-authored data, not measurements");
    }
    debug!(
        "{} pipeline: {} records, scenarios: {:?}",
        variant,
        table.len(),
        table.scenarios()
    );

    let (throughput, latency) = variant.plans(&table, config);

    let output = Path::new(config.output_dir());
    std::fs::create_dir_all(output)?;

    let canvas = Canvas::single(config.dpi());
    let mut written = Vec::new();

    let path = output.join(variant.throughput_file());
    render(&throughput, &canvas, &path)?;
    info!("saved {}", path.display());
    written.push(path);

    let path = output.join(variant.latency_file());
    render(&latency, &canvas, &path)?;
    info!("saved {}", path.display());
    written.push(path);

    if variant.writes_report(config) {
        let path = output.join(variant.report_file());
        render_report(&[throughput, latency], &Canvas::report(config.dpi()), &path)?;
        info!("saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}
