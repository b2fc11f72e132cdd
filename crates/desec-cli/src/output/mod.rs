//! Progress narration on stdout.

use colored::Colorize;
use desec_client::{ApplyOutcome, DnssecOutcome};
use desec_core::{RecordDocument, RecordGroup};
use desec_sync::{SyncObserver, SyncSummary};
use std::path::Path;

/// Prints one line per document and per record group.
#[derive(Debug, Clone)]
pub struct Narrator {
    domain: String,
}

impl Narrator {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn started(&self, dry_run: bool) {
        if dry_run {
            println!("{}", "=== DNS Apply Dry Run Started ===".bold());
        } else {
            println!("{}", "=== DNS Apply Process Started ===".bold());
        }
    }

    pub fn finished(&self, summary: &SyncSummary, dry_run: bool) {
        println!();
        if dry_run {
            println!(
                "{} {} record set(s) in {} document(s) validated, nothing sent",
                "Dry run:".bold(),
                summary.planned,
                summary.documents
            );
            println!("{}", "=== DNS Apply Dry Run Completed ===".bold());
        } else {
            println!(
                "{} {} updated, {} created across {} document(s)",
                "Summary:".bold(),
                summary.replaced,
                summary.created,
                summary.documents
            );
            println!("{}", "=== DNS Apply Process Completed ===".bold());
        }
    }
}

impl SyncObserver for Narrator {
    fn no_documents(&mut self, dir: &Path) {
        println!("No JSON files found inside {}", dir.display());
    }

    fn dnssec(&mut self, outcome: &DnssecOutcome) {
        match outcome {
            DnssecOutcome::Enabled => {
                println!("{} DNSSEC enabled for {}", "✔".green(), self.domain);
            }
            DnssecOutcome::AlreadyEnabled => {
                println!("DNSSEC already enabled for {}", self.domain);
            }
            DnssecOutcome::Failed(reason) => {
                println!(
                    "{} could not enable DNSSEC for {}: {}",
                    "⚠".yellow(),
                    self.domain,
                    reason
                );
            }
        }
    }

    fn document_started(&mut self, _path: &Path, doc: &RecordDocument) {
        println!("\nProcessing: {}", doc.file.cyan());
    }

    fn group_started(&mut self, group: &RecordGroup, fqdn: &str) {
        println!(
            "Applying {} record: {} → {}",
            group.record_type.as_str().yellow(),
            fqdn,
            group.records.join(", ")
        );
    }

    fn group_applied(&mut self, group: &RecordGroup, outcome: ApplyOutcome) {
        let verb = match outcome {
            ApplyOutcome::Replaced => "applied",
            ApplyOutcome::Created => "created",
        };
        println!(
            "{} Successfully {} {} record",
            "✔".green(),
            verb,
            group.record_type
        );
    }

    fn group_planned(&mut self, group: &RecordGroup, fqdn: &str) {
        println!(
            "Would apply {} record: {} → {}",
            group.record_type.as_str().yellow(),
            fqdn,
            group.records.join(", ")
        );
    }
}
