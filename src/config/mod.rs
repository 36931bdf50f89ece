// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod general;

pub use self::general::General;

use crate::chart::{ScenarioStyle, Theme};
use crate::error::{Error, Result};
use crate::pipeline::Variant;

use clap::{App, Arg, ArgMatches};
use log::Level;
use serde_derive::Deserialize;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Highest accepted resolution. A 14x6 in report at this DPI is ~90 MB of RGB.
pub const MAX_DPI: u32 = 600;

/// Which pipelines a run executes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    Measured,
    Illustrative,
    All,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::All
    }
}

impl Pipeline {
    pub fn variants(self) -> &'static [Variant] {
        match self {
            Pipeline::Measured => &[Variant::Measured],
            Pipeline::Illustrative => &[Variant::Illustrative],
            Pipeline::All => &[Variant::Measured, Variant::Illustrative],
        }
    }
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "measured" => Ok(Pipeline::Measured),
            "illustrative" => Ok(Pipeline::Illustrative),
            "all" => Ok(Pipeline::All),
            _ => Err(format!("unknown pipeline: {}", s)),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pipeline::Measured => write!(f, "measured"),
            Pipeline::Illustrative => write!(f, "illustrative"),
            Pipeline::All => write!(f, "all"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    scenario: Vec<ScenarioStyle>,
    #[serde(skip)]
    export_demo: Option<String>,
}

/// The command line interface.
pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(NAME)
        .version(VERSION)
        .author("Brian Martin <bmartin@twitter.com>")
        .about("Throughput and tail-latency comparison charts")
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("TOML config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .value_name("FILE")
                .help("Benchmark results CSV for the measured charts")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output-dir")
                .long("output-dir")
                .value_name("DIR")
                .help("Directory the PNG files are written to")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("pipeline")
                .long("pipeline")
                .value_name("NAME")
                .help("Which charts to produce")
                .possible_value("measured")
                .possible_value("illustrative")
                .possible_value("all")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("theme")
                .long("theme")
                .value_name("NAME")
                .help("Chart theme")
                .possible_value("whitegrid")
                .possible_value("paper")
                .possible_value("ggplot")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("combined")
                .long("combined")
                .help("Also render both charts side by side in one report image")
                .conflicts_with("separate"),
        )
        .arg(
            Arg::with_name("separate")
                .long("separate")
                .help("Only render the separate charts, never the report image"),
        )
        .arg(
            Arg::with_name("export-demo")
                .long("export-demo")
                .value_name("FILE")
                .help("Write the illustrative table as CSV")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Increase verbosity by one level. Can be used more than once")
                .multiple(true),
        )
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Result<Config> {
        Self::from_matches(&app().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)?
        } else {
            Default::default()
        };

        if let Some(input) = matches.value_of("input") {
            config.general.set_input(input.to_string());
        }

        if let Some(output_dir) = matches.value_of("output-dir") {
            config.general.set_output_dir(output_dir.to_string());
        }

        if let Some(pipeline) = matches.value_of("pipeline") {
            config.general.set_pipeline(pipeline.parse().map_err(Error::Config)?);
        }

        if let Some(theme) = matches.value_of("theme") {
            config.general.set_theme(theme.parse().map_err(Error::Config)?);
        }

        if matches.is_present("combined") {
            config.general.set_combined(true);
        }

        if matches.is_present("separate") {
            config.general.set_combined(false);
        }

        config.export_demo = matches.value_of("export-demo").map(|v| v.to_string());

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        Ok(config)
    }

    pub fn load_from_file(filename: &str) -> Result<Config> {
        let mut file = std::fs::File::open(filename)
            .map_err(|e| Error::Config(format!("unable to open {}: {}", filename, e)))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Config(format!("unable to read {}: {}", filename, e)))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", filename, e)))?;
        config
            .validate()
            .map_err(|e| Error::Config(format!("{}: {}", filename, e)))?;
        Ok(config)
    }

    pub fn load_from_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let dpi = self.dpi();
        if dpi == 0 || dpi > MAX_DPI {
            return Err(format!("dpi must be between 1 and {}, got {}", MAX_DPI, dpi));
        }
        Ok(())
    }

    pub fn input(&self) -> &str {
        self.general.input()
    }

    pub fn output_dir(&self) -> &str {
        self.general.output_dir()
    }

    pub fn pipeline(&self) -> Pipeline {
        self.general.pipeline()
    }

    pub fn theme(&self) -> Theme {
        self.general.theme()
    }

    /// Whether to render the side-by-side report in addition to the separate
    /// charts. `None` leaves it to each pipeline.
    pub fn combined(&self) -> Option<bool> {
        self.general.combined()
    }

    pub fn dpi(&self) -> u32 {
        self.general.dpi()
    }

    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    /// per-scenario style overrides, in file order
    pub fn scenarios(&self) -> &[ScenarioStyle] {
        &self.scenario
    }

    pub fn export_demo(&self) -> Option<&str> {
        self.export_demo.as_deref()
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config:");
        info!("Config: Input: {} Output: {}", self.input(), self.output_dir());
        info!(
            "Config: Pipeline: {} Theme: {:?} Combined: {:?} DPI: {}",
            self.pipeline(),
            self.theme(),
            self.combined(),
            self.dpi()
        );
        for scenario in self.scenarios() {
            debug!("Config: Scenario style: {:?}", scenario);
        }
        info!("-----");
    }
}
