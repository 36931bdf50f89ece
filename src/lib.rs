// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Throughput and tail-latency comparison charts for benchmark results.
//!
//! A [`Table`] of per-scenario measurements is split into one [`Series`] per
//! scenario and metric, then drawn as line charts against concurrency.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod chart;
pub mod config;
mod error;
mod logger;
pub mod pipeline;
mod series;
mod table;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::logger::{Level, Logger};
pub use crate::pipeline::{run, Variant};
pub use crate::series::{extract, Metric, Series};
pub use crate::table::{Record, Table};
