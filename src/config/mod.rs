//! Configuration module for Site-Digest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the built-in
//! defaults (10 second fetch timeout, 500 ms politeness delay).
//!
//! Production deployments are expected to keep both at their defaults. They
//! are configurable so tests and local runs can shorten them; a delay of 0
//! removes the per-worker pause entirely.
//!
//! # Example
//!
//! ```no_run
//! use site_digest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-digest.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, StorageConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
