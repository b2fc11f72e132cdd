//! Zone-level endpoints.

use crate::DesecClient;
use desec_core::DesecError;
use serde::Serialize;
use tracing::{info, warn};

/// Result of asking the API to turn on DNSSEC. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnssecOutcome {
    /// The request was accepted
    Enabled,
    /// The API answered 400, which it does when signing is already on
    AlreadyEnabled,
    /// Anything else; the message says what went wrong
    Failed(String),
}

#[derive(Serialize)]
struct DnssecPatch {
    dnssec: bool,
}

/// Zone-level endpoints
pub struct DomainApi<'a> {
    client: &'a DesecClient,
}

impl<'a> DomainApi<'a> {
    pub(crate) const fn new(client: &'a DesecClient) -> Self {
        Self { client }
    }

    /// Enable DNSSEC signing for the zone.
    ///
    /// Best effort: failures are logged and reported in the outcome, never
    /// returned as errors.
    pub async fn enable_dnssec(&self) -> DnssecOutcome {
        let domain = self.client.domain();

        let result = match self.client.zone_url(&[]) {
            Ok(url) => self.client.patch(url, &DnssecPatch { dnssec: true }).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(domain, "DNSSEC enabled");
                DnssecOutcome::Enabled
            }
            Err(DesecError::Api { code: 400, message }) => {
                info!(domain, response = %message, "DNSSEC already enabled");
                DnssecOutcome::AlreadyEnabled
            }
            Err(e) => {
                warn!(domain, error = %e, "could not enable DNSSEC");
                DnssecOutcome::Failed(e.to_string())
            }
        }
    }
}
