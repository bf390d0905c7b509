//! Reconciler implementation
//!
//! One reconcile cycle fetches the Corefile, lists routing entities,
//! derives and merges the rewrite rules, and writes the document back only
//! when the merged text differs. Whatever triggered the cycle, the full rule
//! set is recomputed, so rules of deleted or un-annotated entities vanish.
//!
//! Conflicts are retried straight away with fresh data; transient failures
//! are retried with exponential backoff. Both share one attempt budget.

use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use corefile_blocks::{LineDiff, Placement, merge_with_report};
use corefile_meta::Config;
use tracing::{debug, info, warn};

use crate::entity::{EntityKey, derive_rules};
use crate::store::DocumentStore;
use crate::{Error, Result};

/// What a reconcile cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to reconcile yet (document or entity list missing)
    Skipped { reason: String },
    /// The document already held the desired rules
    Unchanged,
    /// The document was rewritten
    Updated,
    /// Dry run: the document would have been rewritten
    WouldUpdate,
}

/// Report from a reconcile cycle
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub outcome: Outcome,
    /// Number of rules in the managed region
    pub rules: usize,
    /// Attempts used, including the successful one
    pub attempts: u32,
    /// Where the region was placed, when a merge ran
    pub placement: Option<Placement>,
    /// Line changes, when the document changed or would change
    pub diff: Option<LineDiff>,
}

impl ReconcileReport {
    fn skipped(reason: String) -> Self {
        Self {
            outcome: Outcome::Skipped { reason },
            rules: 0,
            attempts: 0,
            placement: None,
            diff: None,
        }
    }

    /// True when the stored document differs (or differed) from the
    /// desired one.
    pub fn has_drift(&self) -> bool {
        matches!(self.outcome, Outcome::Updated | Outcome::WouldUpdate)
    }
}

/// Options for a reconcile cycle
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Compute the merged document without writing it
    pub dry_run: bool,
}

/// Keeps the managed region of one Corefile in sync with the routed hosts.
pub struct Reconciler<S> {
    store: S,
    config: Config,
}

impl<S: DocumentStore> Reconciler<S> {
    /// Create a reconciler.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(store: S, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one reconcile cycle, retrying conflicts and transient errors.
    ///
    /// `trigger` names the entity whose change caused the cycle; it only
    /// affects logging.
    pub async fn reconcile(
        &self,
        trigger: Option<&EntityKey>,
        options: &ReconcileOptions,
    ) -> Result<ReconcileReport> {
        let retry = &self.config.retry;
        let mut backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(retry.initial_interval())
            .with_max_interval(retry.max_interval())
            .with_max_elapsed_time(Some(retry.max_elapsed()))
            .build();

        match trigger {
            Some(key) => info!(document = %self.config.document, trigger = %key, "Reconciling"),
            None => info!(document = %self.config.document, "Reconciling"),
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match self.sync_once(options).await {
                Ok(mut report) => {
                    report.attempts = attempt;
                    return Ok(report);
                }
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            if attempt >= retry.max_attempts {
                return Err(Error::RetriesExhausted {
                    attempts: attempt,
                    last: error.to_string(),
                });
            }

            if let Error::Conflict(_) = error {
                warn!(attempt, %error, "Document changed concurrently, retrying with fresh data");
                continue;
            }

            let Some(delay) = backoff.next_backoff() else {
                return Err(Error::RetriesExhausted {
                    attempts: attempt,
                    last: error.to_string(),
                });
            };
            warn!(attempt, %error, ?delay, "Store unavailable, backing off");
            tokio::time::sleep(delay).await;
        }
    }

    /// A single fetch-merge-write pass.
    async fn sync_once(&self, options: &ReconcileOptions) -> Result<ReconcileReport> {
        let fetched = match self.store.fetch_document().await {
            Ok(fetched) => fetched,
            Err(Error::NotFound(what)) => {
                info!(%what, "Document not found, nothing to reconcile yet");
                return Ok(ReconcileReport::skipped(format!("document not found: {what}")));
            }
            Err(e) => return Err(e),
        };

        let entities = match self.store.list_routing_entities().await {
            Ok(entities) => entities,
            Err(Error::NotFound(what)) => {
                info!(%what, "Routing entities not found, nothing to reconcile yet");
                return Ok(ReconcileReport::skipped(format!("entities not found: {what}")));
            }
            Err(e) => return Err(e),
        };

        let rules = derive_rules(&entities, &self.config.rules);
        debug!(entities = entities.len(), rules = rules.len(), "Derived rewrite rules");

        let merged = merge_with_report(
            &fetched.text,
            &rules,
            &self.config.rules.excluded_namespaces,
            &self.config.vocabulary,
        );

        let mut report = ReconcileReport {
            outcome: Outcome::Unchanged,
            rules: merged.rule_count,
            attempts: 0,
            placement: Some(merged.placement),
            diff: None,
        };

        if merged.text == fetched.text {
            info!(rules = report.rules, "Rewrite rules are already up to date");
            return Ok(report);
        }

        report.diff = Some(LineDiff::compute(&fetched.text, &merged.text));

        if options.dry_run {
            info!(rules = report.rules, "Dry run: document would be updated");
            report.outcome = Outcome::WouldUpdate;
            return Ok(report);
        }

        self.store
            .write_document(&merged.text, &fetched.revision)
            .await?;
        info!(
            rules = report.rules,
            auxiliary_injected = merged.auxiliary_injected,
            "Updated document with new rewrite rules"
        );
        report.outcome = Outcome::Updated;
        Ok(report)
    }
}
