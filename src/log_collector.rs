//! Stderr logging backend for the `log` facade.
//!
//! The library only uses `log::*` macros. The binary installs a
//! [`LogCollector`] as the global logger; every line goes to stderr with a
//! timestamp, and can additionally be captured in memory.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// One formatted log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// The actual log message
    pub message: String,
    pub level: log::Level,
    /// Local time the line was created
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: log::Level, message: String) -> Self {
        LogLine {
            message,
            level,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    /// `[timestamp] [LEVEL] message`
    pub fn formatted(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Logger writing to stderr, optionally keeping a copy of every line.
#[derive(Clone)]
pub struct LogCollector {
    max_level: LevelFilter,
    captured: Option<Arc<Mutex<Vec<LogLine>>>>,
    echo: bool,
}

impl LogCollector {
    pub fn new(max_level: LevelFilter) -> Self {
        LogCollector {
            max_level,
            captured: None,
            echo: true,
        }
    }

    /// Keep lines in memory instead of writing them to stderr.
    pub fn capturing(max_level: LevelFilter) -> Self {
        LogCollector {
            max_level,
            captured: Some(Arc::new(Mutex::new(Vec::new()))),
            echo: false,
        }
    }

    /// Lines captured so far (empty unless built with [`LogCollector::capturing`]).
    pub fn lines(&self) -> Vec<LogLine> {
        self.captured
            .as_ref()
            .and_then(|c| c.lock().ok().map(|l| l.clone()))
            .unwrap_or_default()
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.max_level;
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(level))
    }
}

/// Map `-v` occurrences to a level: warn, info, then debug and beyond.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine::new(record.level(), record.args().to_string());
        if self.echo {
            // Nothing sensible to do if stderr is gone
            let _ = writeln!(std::io::stderr().lock(), "{}", line.formatted());
        }
        if let Some(captured) = &self.captured {
            if let Ok(mut lines) = captured.lock() {
                lines.push(line);
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
