// Copyright 2019 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A minimal stdout logger for the `log` facade.

pub use log::Level;

use log::{Log, Metadata, Record, SetLoggerError};

pub struct Logger {
    label: Option<&'static str>,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            label: None,
            level: Level::Info,
        }
    }
}

impl Logger {
    pub fn new() -> Self {
        Default::default()
    }

    /// Shown in place of the module path for messages above debug level.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    fn format(&self, record: &Record) -> String {
        let target = match self.label {
            Some(label) if record.level() < Level::Debug => label,
            _ => record.target(),
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_by_level() {
        let logger = Logger::new().level(Level::Warn);
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Info).build()));
    }

    #[test]
    fn label_replaces_target() {
        let logger = Logger::new().label("perfplot").level(Level::Trace);

        let line = logger.format(
            &Record::builder()
                .args(format_args!("saved demo_qps.png"))
                .level(Level::Info)
                .target("perfplot::pipeline")
                .build(),
        );
        assert!(line.ends_with("INFO  [perfplot] saved demo_qps.png"), "{}", line);

        let line = logger.format(
            &Record::builder()
                .args(format_args!("3 records"))
                .level(Level::Debug)
                .target("perfplot::table")
                .build(),
        );
        assert!(line.ends_with("DEBUG [perfplot::table] 3 records"), "{}", line);
    }
}
