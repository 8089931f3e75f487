//! Command-line probe for API gateway proxy envelopes.
//!
//! Builds a request from flags or a JSON file, logs its body size and headers,
//! and prints the gateway request envelope; decodes response envelopes back
//! into plain responses; prints the ready-made error envelopes.
//!
//! # Modules
//!
//! - [`command`] — `clap` interface and command execution
//! - [`config`] — TOML configuration with environment variable expansion
//! - [`error`] — Probe error types

pub mod command;
pub mod config;
pub mod error;

pub use command::{Cli, Command, execute};
pub use config::ProbeConfig;
pub use error::ProbeError;
