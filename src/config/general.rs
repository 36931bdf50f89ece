// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::Theme;
use crate::config::Pipeline;

use log::Level;
use serde_derive::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_input")]
    input: String,
    #[serde(default = "default_output_dir")]
    output_dir: String,
    #[serde(default)]
    pipeline: Pipeline,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    combined: Option<bool>,
    #[serde(default = "default_dpi")]
    dpi: u32,
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl General {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, output_dir: String) {
        self.output_dir = output_dir;
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn combined(&self) -> Option<bool> {
        self.combined
    }

    pub fn set_combined(&mut self, combined: bool) {
        self.combined = Some(combined);
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }
}

impl Default for General {
    fn default() -> General {
        General {
            input: default_input(),
            output_dir: default_output_dir(),
            pipeline: Default::default(),
            theme: Default::default(),
            combined: None,
            dpi: default_dpi(),
            logging: default_logging_level(),
        }
    }
}

fn default_input() -> String {
    "benchmark_results.csv".to_owned()
}

fn default_output_dir() -> String {
    ".".to_owned()
}

fn default_dpi() -> u32 {
    300
}

fn default_logging_level() -> Level {
    Level::Info
}
