//! Configuration types for corefile-sync
//!
//! Every section has defaults matching a stock CoreDNS install, so a config
//! file only needs `rules.target`:
//!
//! ```toml
//! [rules]
//! target = "ingress-nginx-controller.ingress-nginx.svc.cluster.local"
//! annotation = "corefile-sync/managed"
//! excluded_namespaces = ["kube-system"]
//! ```

use std::fmt;
use std::time::Duration;

use corefile_blocks::Vocabulary;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which document holds the Corefile
    pub document: DocumentConfig,
    /// How routing entities become rules
    pub rules: RulesConfig,
    /// Markers, anchor and rule text
    pub vocabulary: Vocabulary,
    /// Retry limits for store operations
    pub retry: RetryConfig,
    /// Logging
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Check the configuration is usable for a reconcile.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid vocabulary, a missing rule target or
    /// a zero attempt budget.
    pub fn validate(&self) -> Result<()> {
        self.vocabulary.validate()?;

        if self.rules.target.trim().is_empty() {
            return Err(Error::Invalid("rules.target must be set".into()));
        }
        if self.rules.target.split_whitespace().count() != 1 {
            return Err(Error::Invalid(format!(
                "rules.target must be a single name, got {:?}",
                self.rules.target
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::Invalid("retry.max_attempts must be at least 1".into()));
        }

        Ok(())
    }
}

/// Location of the Corefile inside the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub name: String,
    pub namespace: String,
    /// Key under which the Corefile text is stored
    pub key: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: "coredns".to_string(),
            namespace: "kube-system".to_string(),
            key: "Corefile".to_string(),
        }
    }
}

impl fmt::Display for DocumentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}[{}]", self.namespace, self.name, self.key)
    }
}

/// Rule derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Annotation key an entity must carry to be routed. `None` routes all.
    pub annotation: Option<String>,
    /// Name every routed host is rewritten to
    pub target: String,
    /// Client namespaces the rules must not apply to
    pub excluded_namespaces: Vec<String>,
}

/// Retry limits for conflict and transient store errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Reconcile attempts before giving up
    pub max_attempts: u32,
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
    /// Total time budget across all attempts
    pub max_elapsed_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_interval_ms: 100,
            max_interval_ms: 2_000,
            max_elapsed_ms: 10_000,
        }
    }
}

impl RetryConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    pub fn max_elapsed(&self) -> Duration {
        Duration::from_millis(self.max_elapsed_ms)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "corefile_sync=debug,warn")
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
