// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::style::RGBColor;
use serde_derive::Deserialize;

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

macro_rules! hexcolour {
    ($colour:literal) => {
        Colour(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

/// Line colours handed out to scenarios without an explicit colour, in
/// first-seen order.
pub const COLOURS: &[Colour] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
    hexcolour!(0xAA4499),
    hexcolour!(0xCC6677),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Colour(pub u8, pub u8, pub u8);

impl Colour {
    pub fn rgb(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

impl FromStr for Colour {
    type Err = String;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("bad colour: {}", s));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|e| format!("bad colour: {}: {}", s, e))?;
        Ok(Colour(
            ((value & 0xFF0000) >> 16) as u8,
            ((value & 0x00FF00) >> 8) as u8,
            (value & 0x0000FF) as u8,
        ))
    }
}

impl TryFrom<String> for Colour {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Cross,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

/// Global look of every chart in a run. Resolved once from the configuration;
/// `Whitegrid` when nothing is configured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Whitegrid,
    Paper,
    Ggplot,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Whitegrid
    }
}

impl Theme {
    pub fn background(self) -> Colour {
        match self {
            Theme::Whitegrid | Theme::Paper => hexcolour!(0xFFFFFF),
            Theme::Ggplot => hexcolour!(0xE5E5E5),
        }
    }

    pub fn grid(self) -> Colour {
        match self {
            Theme::Whitegrid => hexcolour!(0xCCCCCC),
            Theme::Paper => hexcolour!(0xDDDDDD),
            Theme::Ggplot => hexcolour!(0xFFFFFF),
        }
    }

    /// multiplier applied to every font size
    pub fn font_scale(self) -> f64 {
        match self {
            Theme::Paper => 0.85,
            Theme::Whitegrid | Theme::Ggplot => 1.0,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whitegrid" => Ok(Theme::Whitegrid),
            "paper" => Ok(Theme::Paper),
            "ggplot" => Ok(Theme::Ggplot),
            _ => Err(format!("unknown theme: {}", s)),
        }
    }
}

/// How a single scenario's line is drawn. Widths and sizes are in points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    pub colour: Colour,
    pub marker: Marker,
    pub dash: Dash,
    pub line_width: f64,
    pub marker_size: f64,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            colour: COLOURS[0],
            marker: Marker::Circle,
            dash: Dash::Solid,
            line_width: 2.0,
            marker_size: 6.0,
        }
    }
}

/// A per-scenario override. Unset fields fall through to the defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStyle {
    name: String,
    colour: Option<Colour>,
    marker: Option<Marker>,
    line: Option<Dash>,
}

impl ScenarioStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colour: None,
            marker: None,
            line: None,
        }
    }

    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn line(mut self, line: Dash) -> Self {
        self.line = Some(line);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Assigns a `SeriesStyle` to each scenario of a chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    base: SeriesStyle,
    scenarios: Vec<ScenarioStyle>,
}

impl StyleSheet {
    pub fn new(base: SeriesStyle) -> Self {
        Self {
            base,
            scenarios: Vec::new(),
        }
    }

    /// Add overrides. Later entries win over earlier ones for the same field.
    pub fn extend<'a, I>(&mut self, scenarios: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a ScenarioStyle>,
    {
        self.scenarios.extend(scenarios.into_iter().cloned());
        self
    }

    /// `index` is the scenario's first-seen position in the table, so a
    /// scenario gets the same palette colour on every chart of a run.
    pub fn resolve(&self, index: usize, scenario: &str) -> SeriesStyle {
        let mut style = self.base;
        style.colour = COLOURS[index % COLOURS.len()];

        for s in self.scenarios.iter().filter(|s| s.name == scenario) {
            if let Some(colour) = s.colour {
                style.colour = colour;
            }
            if let Some(marker) = s.marker {
                style.marker = marker;
            }
            if let Some(line) = s.line {
                style.dash = line;
            }
        }

        style
    }
}
