//! Error handling types and utilities.
//!
//! The search core never fails; errors only arise at the edges (loading the
//! corpus, reading config, persisting rotation state). Each edge has its own
//! typed error, re-exported here.

pub use crate::config::ConfigError;
pub use crate::corpus::CorpusError;
pub use crate::rotation::RotationError;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods at the binary and tool-handler boundaries.
pub type Result<T> = anyhow::Result<T>;
