// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[macro_use]
extern crate log;

use perfplot::config::VERSION;
use perfplot::{chart, fatal, pipeline, Config, Logger, Table};

pub fn main() {
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    Logger::new()
        .label("perfplot")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("perfplot {} initializing...", VERSION);

    config.print();

    if let Err(e) = chart::init() {
        fatal!("{}", e);
    }

    if let Some(path) = config.export_demo() {
        match Table::illustrative().write_csv(path) {
            Ok(()) => info!("wrote illustrative table to {}", path),
            Err(e) => error!("unable to write {}: {}", path, e),
        }
    }

    for variant in config.pipeline().variants() {
        match pipeline::run(*variant, &config) {
            Ok(files) => info!("{} pipeline: {} charts written", variant, files.len()),
            Err(e) => error!("{} pipeline: {}", variant, e),
        }
    }
}
