//! Input/output, configuration and error handling

/// Command-line interface and session runner
pub mod cli;
/// Compile-time defaults and the file-backed configuration
pub mod configuration;
/// Error types for every fallible operation
pub mod error;
/// Heat-map PNG export of level slices
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Session snapshot persistence
pub mod snapshot;
