//! The logger handle, its builder, and the factory function.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Level;
use crate::errors::BuildError;
use crate::sinks::{NoopSink, Sink, StdoutSink};
use crate::types::{field, Field, Record};

/// Cloneable handle for emitting structured JSON records.
///
/// Handles are immutable: [`with_fields`](Logger::with_fields) and
/// [`named`](Logger::named) return new handles and leave the original
/// untouched, so one handle can be shared across threads and derived per
/// request without coordination.
#[derive(Clone)]
pub struct Logger {
    level: Level,
    name: Option<String>,
    fields: Arc<Vec<Field>>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Starts building a customized handle.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Returns a handle that silently discards every record.
    pub fn noop() -> Self {
        Self {
            level: Level::default(),
            name: None,
            fields: Arc::new(Vec::new()),
            sink: Arc::new(NoopSink::new()),
        }
    }

    /// The minimum severity this handle emits.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The dotted logger name, if one was assigned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields stamped on every record emitted through this handle.
    pub fn persistent_fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether a record at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Returns a derived handle carrying additional persistent fields.
    ///
    /// The parent handle is not modified and keeps emitting without the new
    /// fields.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_logging::{field, Logger};
    ///
    /// let root = Logger::noop();
    /// let request = root.with_fields([field("request_id", "r-42")]);
    /// request.info("accepted", &[]);
    /// ```
    pub fn with_fields(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut combined = Vec::clone(&self.fields);
        combined.extend(fields);

        Self {
            level: self.level,
            name: self.name.clone(),
            fields: Arc::new(combined),
            sink: Arc::clone(&self.sink),
        }
    }

    /// Returns a derived handle with `name` appended to the dotted logger
    /// name (`"billing"` then `"worker"` yields `"billing.worker"`).
    ///
    /// An empty `name` returns an unchanged handle.
    pub fn named(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }

        let joined = match &self.name {
            Some(current) => format!("{}.{}", current, name),
            None => name.to_string(),
        };

        Self {
            level: self.level,
            name: Some(joined),
            fields: Arc::clone(&self.fields),
            sink: Arc::clone(&self.sink),
        }
    }

    /// Emits a record at an arbitrary severity.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        self.emit(level, message, fields, Location::caller());
    }

    /// Emits a debug record.
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Debug, message, fields, Location::caller());
    }

    /// Emits an info record.
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Info, message, fields, Location::caller());
    }

    /// Emits a warn record.
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Warn, message, fields, Location::caller());
    }

    /// Emits an error record, including a captured stack trace.
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Error, message, fields, Location::caller());
    }

    /// Emits a panic-severity record. Emission only; the process keeps
    /// running.
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Panic, message, fields, Location::caller());
    }

    /// Emits a fatal-severity record. Emission only; the process keeps
    /// running.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        self.emit(Level::Fatal, message, fields, Location::caller());
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        fields: &[Field],
        location: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut record = Record::new(
            level,
            self.name.clone(),
            short_caller(location),
            message,
            &self.fields,
            fields,
        );
        if level >= Level::Error {
            record.stack_trace = Some(Backtrace::force_capture().to_string());
        }

        match serde_json::to_string(&record) {
            Ok(line) => self.sink.write_line(&line),
            Err(err) => eprintln!("integrations-logging: failed to encode record: {}", err),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`] handles.
///
/// The defaults match production use: [`Level::Info`], no name, no
/// persistent fields, records written to stdout. Tests typically swap the
/// sink for a [`MemorySink`](crate::mocks::MemorySink).
pub struct LoggerBuilder {
    level: Level,
    name: Option<String>,
    fields: Vec<Field>,
    sink: Arc<dyn Sink>,
}

impl LoggerBuilder {
    fn new() -> Self {
        Self {
            level: Level::default(),
            name: None,
            fields: Vec::new(),
            sink: Arc::new(StdoutSink::new()),
        }
    }

    /// Sets the minimum emitted severity.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the initial dotted logger name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds one persistent field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }

    /// Adds persistent fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Replaces the output sink.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Finalizes the handle.
    ///
    /// Encodes a probe record with the configured fields so a configuration
    /// the encoder cannot represent is rejected here rather than at the
    /// first emission.
    pub fn build(self) -> Result<Logger, BuildError> {
        let probe = Record::new(
            Level::Info,
            self.name.clone(),
            String::new(),
            "configuration probe",
            &self.fields,
            &[],
        );
        serde_json::to_string(&probe)?;

        Ok(Logger {
            level: self.level,
            name: self.name,
            fields: Arc::new(self.fields),
            sink: self.sink,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the process logger handle.
///
/// The verbosity threshold comes from the
/// [`LOGGING_LEVEL`](crate::config::LOGGING_LEVEL) environment variable;
/// `app_name` and `app_version` are stamped on every record the handle
/// emits. Neither argument is validated.
pub fn create_logger(app_name: &str, app_version: &str) -> Result<Logger, BuildError> {
    Logger::builder()
        .level(Level::from_env())
        .fields([
            field("app_name", app_name),
            field("app_version", app_version),
        ])
        .build()
}

fn short_caller(location: &'static Location<'static>) -> String {
    format!("{}:{}", trim_file_path(location.file()), location.line())
}

/// Keeps at most the last two path components of a source file path, so the
/// caller reads `src/worker.rs:42` rather than a full build path.
fn trim_file_path(file: &str) -> &str {
    match file.rfind('/') {
        Some(last_sep) => match file[..last_sep].rfind('/') {
            Some(prev_sep) => &file[prev_sep + 1..],
            None => file,
        },
        None => file,
    }
}
