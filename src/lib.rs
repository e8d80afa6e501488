//! # Integrations Logging
//!
//! Shared structured JSON logging and context propagation for integrations.
//!
//! ## Features
//!
//! - One-call logger construction with the verbosity threshold taken from
//!   the `LOGGING_LEVEL` environment variable
//! - One JSON object per record on stdout with fixed field names
//!   (`message`, `level`, `@timestamp`, `logger_name`, `caller`,
//!   `stack_trace`)
//! - Persistent `app_name` / `app_version` fields on every record
//! - Immutable handles with cheap derivation (`with_fields`, `named`)
//! - Context propagation with a silent no-op fallback at retrieval
//! - Pluggable sinks and an in-memory capture sink for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use integrations_logging::{create_logger, field, from_context, with_logger, Context};
//!
//! # fn main() -> Result<(), integrations_logging::BuildError> {
//! // Build once at startup.
//! let logger = create_logger("billing-service", "1.4.2")?;
//!
//! // Attach at the root of a unit of work.
//! let ctx = with_logger(&Context::new(), logger);
//!
//! // Retrieve anywhere downstream; never fails.
//! let logger = from_context(&ctx);
//! logger.info("service started", &[field("port", 8080)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - `config` - Verbosity levels and environment-driven selection
//! - `context` - Immutable execution context and logger attachment
//! - `errors` - Error types
//! - `logger` - The handle, its builder, and the factory function
//! - `sinks` - Emission boundaries (stdout, discard)
//! - `types` - Record and field types
//! - `mocks` - In-memory capture sink for tests

// Public modules
pub mod config;
pub mod context;
pub mod errors;
pub mod logger;
pub mod sinks;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod mocks;

// Re-exports for convenience
pub use config::{Level, LOGGING_LEVEL};
pub use context::{from_context, with_logger, Context};
pub use errors::{BuildError, ParseLevelError};
pub use logger::{create_logger, Logger, LoggerBuilder};
pub use sinks::{NoopSink, Sink, StdoutSink};
pub use types::{field, Field, Record};
