// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multi-series line charts of one metric against concurrency.
//!
//! Drawing happens in two steps. [`plan`] turns extracted series and a
//! [`ChartStyle`] into a [`ChartPlan`]: the exact points, styles, ranges and
//! labels that will end up on the image. [`render`] and [`render_report`]
//! then draw one or more plans into a PNG file.

mod scales;
mod style;

pub use scales::*;
pub use style::*;

use crate::error::{Error, Result};
use crate::series::Series;

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::register_font;

use std::ops::Range;
use std::path::Path;

/// Font family every chart is drawn with, registered from the embedded font.
pub const FONT: &str = "dejavu-sans-mono";

/// Upper bound on the number of labelled y axis ticks.
const Y_LABELS: usize = 10;

/// Register the embedded font with the text renderer. Must succeed once
/// before anything is rendered.
pub fn init() -> Result<()> {
    let font = dejavu::sans_mono::regular();
    register_font(FONT, FontStyle::Normal, font)
        .map_err(|_| Error::MissingDependency(format!("unable to load font for {}", FONT)))?;
    register_font(FONT, FontStyle::Bold, font)
        .map_err(|_| Error::MissingDependency(format!("unable to load font for {}", FONT)))?;
    Ok(())
}

/// Physical figure size. Pixel dimensions are the size in inches at `dpi`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    dpi: u32,
}

impl Canvas {
    pub fn new(width: f64, height: f64, dpi: u32) -> Self {
        Self { width, height, dpi }
    }

    /// a single chart, 10x6 in
    pub fn single(dpi: u32) -> Self {
        Self::new(10.0, 6.0, dpi)
    }

    /// two charts side by side, 14x6 in
    pub fn report(dpi: u32) -> Self {
        Self::new(14.0, 6.0, dpi)
    }

    pub fn size(&self) -> (u32, u32) {
        (
            (self.width * self.dpi as f64).round() as u32,
            (self.height * self.dpi as f64).round() as u32,
        )
    }

    /// typographic points to pixels
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// inches to pixels
    pub fn px(&self, inches: f64) -> u32 {
        (inches * self.dpi as f64).round() as u32
    }
}

/// Everything about a chart that isn't data.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    caption: String,
    x_desc: String,
    y_desc: String,
    scale: f64,
    x_ticks: Option<Vec<u32>>,
    theme: Theme,
    styles: StyleSheet,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            caption: String::new(),
            x_desc: "Concurrent Threads".to_owned(),
            y_desc: String::new(),
            scale: 1.0,
            x_ticks: None,
            theme: Theme::default(),
            styles: StyleSheet::default(),
        }
    }
}

impl ChartStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caption(&mut self, caption: impl AsRef<str>) -> &mut Self {
        self.caption = caption.as_ref().to_owned();
        self
    }

    pub fn x_desc(&mut self, x_desc: impl AsRef<str>) -> &mut Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(&mut self, y_desc: impl AsRef<str>) -> &mut Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    /// Plotted values are divided by `scale`, e.g. `10_000.0` to draw QPS in
    /// units of ten thousand.
    pub fn scale(&mut self, scale: f64) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Pin the x axis ticks. Without this, ticks are placed on every
    /// concurrency level present in the data.
    pub fn x_ticks(&mut self, ticks: Vec<u32>) -> &mut Self {
        self.x_ticks = Some(ticks);
        self
    }

    pub fn theme(&mut self, theme: Theme) -> &mut Self {
        self.theme = theme;
        self
    }

    pub fn styles(&mut self, styles: StyleSheet) -> &mut Self {
        self.styles = styles;
        self
    }
}

/// One line of a chart with its legend label.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

/// A chart fully resolved and ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPlan {
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    /// decimal places of the y axis labels
    pub y_decimals: usize,
    pub x_ticks: Vec<f64>,
    pub lines: Vec<Line>,
    pub theme: Theme,
}

impl ChartPlan {
    /// legend entries, in drawing order
    pub fn legend(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.label.as_str()).collect()
    }
}

/// Resolve `series` (one per scenario, in first-seen order) into a plan.
pub fn plan(series: &[Series], style: &ChartStyle) -> ChartPlan {
    let scale = if style.scale > 0.0 { style.scale } else { 1.0 };

    let lines: Vec<Line> = series
        .iter()
        .enumerate()
        .map(|(i, s)| Line {
            label: s.scenario().to_owned(),
            points: s
                .points()
                .iter()
                .map(|(c, v)| (*c as f64, *v / scale))
                .collect(),
            style: style.styles.resolve(i, s.scenario()),
        })
        .collect();

    let x_ticks: Vec<f64> = match &style.x_ticks {
        Some(ticks) => ticks.iter().map(|t| *t as f64).collect(),
        None => {
            let mut levels: Vec<u32> = series
                .iter()
                .flat_map(|s| s.points().iter().map(|(c, _)| *c))
                .collect();
            levels.sort_unstable();
            levels.dedup();
            levels.into_iter().map(|c| c as f64).collect()
        }
    };

    let xs = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|(x, _)| *x))
        .chain(x_ticks.iter().copied());
    let x_range = padded(xs);

    let y_max = lines
        .iter()
        .flat_map(|l| l.points.iter().map(|(_, y)| *y))
        .fold(0.0_f64, f64::max);
    let y_range = if y_max > 0.0 {
        0.0..y_max * 1.1
    } else {
        0.0..1.0
    };

    ChartPlan {
        caption: style.caption.clone(),
        x_desc: style.x_desc.clone(),
        y_desc: style.y_desc.clone(),
        x_range,
        y_decimals: label_decimals(&y_range),
        y_range,
        x_ticks,
        lines,
        theme: style.theme,
    }
}

// span of the values with 5% on either side
fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad)..(max + pad)
}

// enough decimals to tell adjacent y ticks apart
fn label_decimals(range: &Range<f64>) -> usize {
    let ticks = RangedCoordf64::from(range.clone()).key_points(Y_LABELS);
    let step = ticks
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-(step.log10() + 1e-9).floor()).max(0.0) as usize
}

fn tick_label(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Draw `plan` into a PNG at `path`, replacing any existing file.
pub fn render<P: AsRef<Path>>(plan: &ChartPlan, canvas: &Canvas, path: P) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), canvas.size()).into_drawing_area();
    draw_panel(&root, plan, canvas)?;
    root.present()?;
    Ok(())
}

/// Draw several plans side by side into a single PNG at `path`.
pub fn render_report<P: AsRef<Path>>(plans: &[ChartPlan], canvas: &Canvas, path: P) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), canvas.size()).into_drawing_area();
    let background = plans.first().map(|p| p.theme).unwrap_or_default().background();
    root.fill(&background.rgb())?;

    let panels = root.split_evenly((1, plans.len().max(1)));
    for (panel, plan) in panels.iter().zip(plans) {
        draw_panel(panel, plan, canvas)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel(area: &DrawingArea<BitMapBackend, Shift>, plan: &ChartPlan, canvas: &Canvas) -> Result<()> {
    let fonts = plan.theme.font_scale();
    let background = plan.theme.background().rgb();
    let grid = plan.theme.grid().rgb();

    area.fill(&background)?;

    let mut chart = ChartBuilder::on(area)
        .caption(
            &plan.caption,
            (FONT, canvas.pt(16.0 * fonts), FontStyle::Bold),
        )
        .margin(canvas.px(0.2))
        .x_label_area_size(canvas.px(0.7))
        .y_label_area_size(canvas.px(1.1))
        .build_cartesian_2d(
            ConcurrencyCoord::new(plan.x_range.clone(), plan.x_ticks.clone()),
            plan.y_range.clone(),
        )?;

    chart
        .configure_mesh()
        .bold_line_style(grid.mix(0.7).stroke_width(canvas.pt(0.8).round() as u32))
        .light_line_style(background)
        .x_desc(plan.x_desc.as_str())
        .y_desc(plan.y_desc.as_str())
        .axis_desc_style((FONT, canvas.pt(12.0 * fonts)))
        .label_style((FONT, canvas.pt(10.0 * fonts)))
        .y_labels(Y_LABELS)
        .x_label_formatter(&|v: &f64| tick_label(*v, 0))
        .y_label_formatter(&|v: &f64| tick_label(*v, plan.y_decimals))
        .draw()?;

    let legend_len = canvas.px(0.3) as i32;
    for line in &plan.lines {
        let colour = line.style.colour.rgb();
        let width = canvas.pt(line.style.line_width).round().max(1.0) as u32;
        let points = line.points.iter().copied();

        let anno = match line.style.dash {
            Dash::Solid => {
                chart.draw_series(LineSeries::new(points, colour.stroke_width(width)))?
            }
            Dash::Dashed => chart.draw_series(DashedLineSeries::new(
                points,
                (width * 4) as i32,
                (width * 2) as i32,
                colour.stroke_width(width),
            ))?,
            Dash::Dotted => chart.draw_series(DashedLineSeries::new(
                points,
                width as i32,
                (width * 2) as i32,
                colour.stroke_width(width),
            ))?,
        };
        anno.label(line.label.as_str()).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + legend_len, y)], colour.stroke_width(width))
        });

        // marker size is a diameter in points
        let size = (canvas.pt(line.style.marker_size) / 2.0).round().max(1.0) as i32;
        let points = line.points.iter().copied();
        match line.style.marker {
            Marker::Circle => {
                chart.draw_series(points.map(|p| Circle::new(p, size, colour.filled())))?;
            }
            Marker::Triangle => {
                chart.draw_series(points.map(|p| TriangleMarker::new(p, size, colour.filled())))?;
            }
            Marker::Square => {
                chart.draw_series(points.map(|p| {
                    EmptyElement::at(p)
                        + Rectangle::new([(-size, -size), (size, size)], colour.filled())
                }))?;
            }
            Marker::Cross => {
                chart.draw_series(
                    points.map(|p| Cross::new(p, size, colour.stroke_width(width))),
                )?;
            }
        }
    }

    chart
        .configure_series_labels()
        .label_font((FONT, canvas.pt(10.0 * fonts)))
        .legend_area_size(legend_len + canvas.px(0.1) as i32)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{extract, Metric};
    use crate::table::{Record, Table};

    fn two_scenarios() -> Table {
        let mut records = Vec::new();
        for (scenario, base) in [("A", 100.0), ("B", 10.0)].iter() {
            for (i, t) in [1, 4, 8, 16].iter().enumerate() {
                records.push(Record::new(*scenario, *t, base * (i + 1) as f64, 1.0));
            }
        }
        Table::new(records)
    }

    #[test]
    fn canvas_pixels() {
        assert_eq!(Canvas::single(300).size(), (3000, 1800));
        assert_eq!(Canvas::report(300).size(), (4200, 1800));
        assert_eq!(Canvas::single(72).pt(12.0), 12.0);
    }

    #[test]
    fn plan_two_lines() {
        let series = extract(&two_scenarios(), Metric::Throughput);
        let plan = plan(&series, ChartStyle::new().caption("Throughput"));

        assert_eq!(plan.caption, "Throughput");
        assert_eq!(plan.legend(), vec!["A", "B"]);
        assert_eq!(plan.lines.len(), 2);
        assert!(plan.lines.iter().all(|l| l.points.len() == 4));
        assert_eq!(
            plan.lines[0].points,
            vec![(1.0, 100.0), (4.0, 200.0), (8.0, 300.0), (16.0, 400.0)]
        );
        assert_eq!(plan.x_ticks, vec![1.0, 4.0, 8.0, 16.0]);
        assert_eq!(plan.y_range.start, 0.0);
        assert!(plan.y_range.end >= 400.0);
        assert!(plan.x_range.start < 1.0 && plan.x_range.end > 16.0);
        assert_ne!(plan.lines[0].style.colour, plan.lines[1].style.colour);
    }

    #[test]
    fn plan_scaled_with_fixed_ticks() {
        let series = extract(&Table::illustrative(), Metric::Throughput);
        let mut style = ChartStyle::new();
        style.scale(10_000.0).x_ticks(vec![1, 4, 8, 16, 32]);
        let plan = plan(&series, &style);

        assert_eq!(plan.lines[1].label, "FlashCache(MinKV)");
        assert_eq!(plan.lines[1].points[3], (16.0, 550.0));
        assert_eq!(plan.x_ticks, vec![1.0, 4.0, 8.0, 16.0, 32.0]);
        assert!(plan.x_range.end > 32.0);
    }

    #[test]
    fn plan_is_deterministic() {
        let table = Table::illustrative();
        let style = ChartStyle::new();
        let a = plan(&extract(&table, Metric::TailLatency), &style);
        let b = plan(&extract(&table, Metric::TailLatency), &style);
        assert_eq!(a, b);
    }

    #[test]
    fn plan_empty() {
        let plan = plan(&[], &ChartStyle::new());
        assert!(plan.lines.is_empty());
        assert_eq!(plan.x_range, 0.0..1.0);
        assert_eq!(plan.y_range, 0.0..1.0);
    }

    #[test]
    fn single_level() {
        let table = Table::new(vec![Record::new("A", 8, 5.0, 1.0)]);
        let plan = plan(&extract(&table, Metric::Throughput), &ChartStyle::new());
        assert_eq!(plan.x_range, 7.0..9.0);
    }

    #[test]
    fn labels() {
        assert_eq!(tick_label(16.0, 0), "16");
        assert_eq!(tick_label(2.5, 1), "2.5");
        assert_eq!(tick_label(0.0, 2), "0.00");
    }

    #[test]
    fn whole_number_labels() {
        let series = extract(&two_scenarios(), Metric::Throughput);
        assert_eq!(plan(&series, &ChartStyle::new()).y_decimals, 0);
    }

    #[test]
    fn sub_unit_latency_labels() {
        let table = Table::new(vec![
            Record::new("A", 1, 1.0, 0.04),
            Record::new("A", 4, 1.0, 0.12),
            Record::new("A", 8, 1.0, 0.18),
        ]);
        let plan = plan(&extract(&table, Metric::TailLatency), &ChartStyle::new());
        assert_eq!(plan.y_decimals, 2);

        let labels: Vec<String> = RangedCoordf64::from(plan.y_range.clone())
            .key_points(Y_LABELS)
            .into_iter()
            .map(|v| tick_label(v, plan.y_decimals))
            .collect();
        assert_eq!(labels[0], "0.00");
        assert_eq!(labels[1], "0.02");
        let mut distinct = labels.clone();
        distinct.dedup();
        assert_eq!(distinct, labels);
    }

    #[test]
    fn render_png() {
        init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        let series = extract(&two_scenarios(), Metric::Throughput);
        let plan = plan(&series, ChartStyle::new().caption("A vs B"));
        render(&plan, &Canvas::single(50), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
