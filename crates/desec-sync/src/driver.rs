//! Sequencing a whole run: documents in name order, groups in document order,
//! one request in flight at a time, stop at the first fatal error.

use crate::loader::{list_documents, load_document};
use desec_client::{ApplyOutcome, DesecClient, DnssecOutcome};
use desec_core::{normalize_document, RecordDocument, RecordGroup, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Receives progress events during a run.
///
/// Every method has an empty default so implementors pick what they need.
#[allow(unused_variables)]
pub trait SyncObserver {
    /// The records directory held no documents
    fn no_documents(&mut self, dir: &Path) {}

    /// DNSSEC toggle finished
    fn dnssec(&mut self, outcome: &DnssecOutcome) {}

    /// A document was loaded; its groups are validated and applied next
    fn document_started(&mut self, path: &Path, doc: &RecordDocument) {}

    /// A group is about to be sent
    fn group_started(&mut self, group: &RecordGroup, fqdn: &str) {}

    /// A group was applied
    fn group_applied(&mut self, group: &RecordGroup, outcome: ApplyOutcome) {}

    /// A group was validated in a dry run
    fn group_planned(&mut self, group: &RecordGroup, fqdn: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}

/// What a finished run did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Documents processed
    pub documents: usize,
    /// Groups whose existing RRset was replaced
    pub replaced: usize,
    /// Groups created through the fallback
    pub created: usize,
    /// Groups validated without being sent (dry run)
    pub planned: usize,
}

/// Run settings
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding the `*.json` record documents
    pub records_dir: PathBuf,
    /// Turn on DNSSEC before applying records
    pub dnssec: bool,
}

impl SyncOptions {
    /// Options for `records_dir` with DNSSEC enabled
    #[must_use]
    pub fn new(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            records_dir: records_dir.into(),
            dnssec: true,
        }
    }

    /// Enable or skip the DNSSEC toggle
    #[must_use]
    pub fn dnssec(mut self, enabled: bool) -> Self {
        self.dnssec = enabled;
        self
    }
}

/// Applies a records directory to one deSEC zone
pub struct Syncer {
    client: DesecClient,
    options: SyncOptions,
}

impl Syncer {
    /// Create a syncer using an already configured client
    #[must_use]
    pub fn new(client: DesecClient, options: SyncOptions) -> Self {
        Self { client, options }
    }

    /// Reconcile every document. Already applied groups stay applied when a
    /// later one fails.
    pub async fn run(&self, observer: &mut dyn SyncObserver) -> Result<SyncSummary> {
        let dir = &self.options.records_dir;
        let mut summary = SyncSummary::default();

        let files = list_documents(dir).await?;
        if files.is_empty() {
            observer.no_documents(dir);
            return Ok(summary);
        }

        if self.options.dnssec {
            let outcome = self.client.zone().enable_dnssec().await;
            observer.dnssec(&outcome);
        }

        for path in &files {
            let doc = load_document(path).await?;
            observer.document_started(path, &doc);
            let groups = normalize_document(&doc)?;

            for group in &groups {
                let fqdn = group.fqdn(self.client.domain());
                observer.group_started(group, &fqdn);

                let outcome = self.client.rrsets().apply(group).await?;
                match outcome {
                    ApplyOutcome::Replaced => summary.replaced += 1,
                    ApplyOutcome::Created => summary.created += 1,
                }
                observer.group_applied(group, outcome);
            }

            summary.documents += 1;
        }

        info!(
            documents = summary.documents,
            replaced = summary.replaced,
            created = summary.created,
            "run complete"
        );
        Ok(summary)
    }
}

/// Load and normalize every document under `dir` without sending anything.
pub async fn plan(
    dir: &Path,
    domain: &str,
    observer: &mut dyn SyncObserver,
) -> Result<SyncSummary> {
    let mut summary = SyncSummary::default();

    let files = list_documents(dir).await?;
    if files.is_empty() {
        observer.no_documents(dir);
        return Ok(summary);
    }

    for path in &files {
        let doc = load_document(path).await?;
        observer.document_started(path, &doc);
        let groups = normalize_document(&doc)?;

        for group in &groups {
            observer.group_planned(group, &group.fqdn(domain));
            summary.planned += 1;
        }
        summary.documents += 1;
    }

    debug!(
        documents = summary.documents,
        planned = summary.planned,
        "dry run complete"
    );
    Ok(summary)
}
