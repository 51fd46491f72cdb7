//! # Diagnostic Records
//!
//! Components never print directly. They hand a [`Record`] to the
//! [`DiagnosticSink`] behind their [`Diagnostics`] handle, and the sink
//! decides what happens to it:
//!
//! - [`TracingSink`] forwards to `tracing` (the default)
//! - [`ConsoleSink`] prints coloured lines for the demo binary
//! - [`RecordingSink`] keeps the records so tests can assert on exact text

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use colored::Colorize;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Which component emitted a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Pool,
    Registry,
    Composite,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Pool => "pool",
            Source::Registry => "registry",
            Source::Composite => "composite",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    /// Non-fatal conditions such as a usage conflict.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub source: Source,
    pub level: Level,
    pub message: String,
}

pub trait DiagnosticSink {
    fn emit(&self, record: Record);
}

/// Forwards records to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, record: Record) {
        // tracing targets must be known at compile time
        match (record.source, record.level) {
            (Source::Pool, Level::Info) => info!(target: "pattern_catalog::pool", "{}", record.message),
            (Source::Pool, Level::Warn) => warn!(target: "pattern_catalog::pool", "{}", record.message),
            (Source::Registry, Level::Info) => {
                info!(target: "pattern_catalog::registry", "{}", record.message)
            }
            (Source::Registry, Level::Warn) => {
                warn!(target: "pattern_catalog::registry", "{}", record.message)
            }
            (Source::Composite, Level::Info) => {
                info!(target: "pattern_catalog::composite", "{}", record.message)
            }
            (Source::Composite, Level::Warn) => {
                warn!(target: "pattern_catalog::composite", "{}", record.message)
            }
        }
    }
}

/// Prints each record on stdout, warnings in yellow.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink {
    also_trace: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink { also_trace: false }
    }

    /// Also forward every record to `tracing` after printing it.
    pub fn with_tracing(mut self) -> Self {
        self.also_trace = true;
        self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, record: Record) {
        match record.level {
            Level::Info => println!("  {}", record.message),
            Level::Warn => println!("  {}", record.message.yellow()),
        }
        if self.also_trace {
            TracingSink.emit(record);
        }
    }
}

/// Keeps every record in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Record>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, record: Record) {
        self.records.borrow_mut().push(record);
    }
}

/// Shared handle to a sink. Cloning is a reference-count bump, so every
/// component can carry its own copy.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Rc<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub fn new(sink: Rc<dyn DiagnosticSink>) -> Self {
        Diagnostics { sink }
    }

    pub fn console() -> Self {
        Self::new(Rc::new(ConsoleSink::new()))
    }

    /// A handle backed by a fresh [`RecordingSink`], returned alongside it.
    pub fn recording() -> (Self, Rc<RecordingSink>) {
        let sink = Rc::new(RecordingSink::new());
        (Self::new(sink.clone()), sink)
    }

    pub fn info(&self, source: Source, message: impl Into<String>) {
        self.emit(source, Level::Info, message);
    }

    pub fn warn(&self, source: Source, message: impl Into<String>) {
        self.emit(source, Level::Warn, message);
    }

    fn emit(&self, source: Source, level: Level, message: impl Into<String>) {
        self.sink.emit(Record {
            source,
            level,
            message: message.into(),
        });
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Rc::new(TracingSink))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is
/// harmless: the second subscriber is simply not installed.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(config.color)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(level = %config.level, json = config.json, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let (diagnostics, sink) = Diagnostics::recording();

        diagnostics.info(Source::Pool, "first");
        diagnostics.warn(Source::Registry, "second");
        diagnostics.info(Source::Composite, "third");

        assert_eq!(sink.messages(), vec!["first", "second", "third"]);
        assert_eq!(sink.records()[1].level, Level::Warn);
        assert_eq!(sink.records()[1].source, Source::Registry);
    }

    #[test]
    fn test_clones_share_one_sink() {
        let (diagnostics, sink) = Diagnostics::recording();
        let copy = diagnostics.clone();

        diagnostics.info(Source::Pool, "a");
        copy.info(Source::Pool, "b");

        assert_eq!(sink.messages().len(), 2);
        sink.clear();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_tracing_sink_emits_without_subscriber() {
        let diagnostics = Diagnostics::default();
        diagnostics.info(Source::Composite, "no subscriber installed");
        diagnostics.warn(Source::Pool, "still fine");
    }

    #[test]
    fn test_init_tracing_twice() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(Source::Pool.to_string(), "pool");
        assert_eq!(Source::Registry.to_string(), "registry");
        assert_eq!(Source::Composite.to_string(), "composite");
    }
}
