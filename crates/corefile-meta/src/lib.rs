//! Configuration for corefile-sync.
//!
//! [`Config`] describes which Corefile to manage, how routing entities turn
//! into rewrite rules, the marker vocabulary, retry limits and logging.
//! [`loader`] reads it (and other structured inputs) from TOML, JSON or YAML.

pub mod config;
pub mod error;
pub mod loader;

pub use config::{Config, DocumentConfig, RetryConfig, RulesConfig, TelemetryConfig};
pub use error::{Error, Result};
pub use loader::{load_config, load_structured};
