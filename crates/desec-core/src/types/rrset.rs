use serde::{Deserialize, Serialize};

use super::RecordType;

/// TTL applied to every RRset written by this tool
pub const DEFAULT_TTL: u32 = 3600;

/// One record type applied to one subname, in the shape the deSEC
/// `rrsets` endpoint expects.
///
/// Built by [`crate::normalize_group`], which guarantees `records` is
/// non-empty and canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordGroup {
    /// Label relative to the zone apex
    pub subname: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Canonicalized record data
    pub records: Vec<String>,

    /// Time to live in seconds
    pub ttl: u32,
}

impl RecordGroup {
    /// Fully qualified name of the group under `zone`
    #[must_use]
    pub fn fqdn(&self, zone: &str) -> String {
        format!("{}.{}", self.subname, zone.trim_end_matches('.'))
    }
}
