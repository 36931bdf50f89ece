// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum Error {
    #[error("rendering support unavailable: {0}")]
    MissingDependency(String),
    #[error("input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("bad configuration: {0}")]
    Config(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Error::Draw(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
