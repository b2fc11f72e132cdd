//! API endpoint modules.

mod domain;
mod rrsets;

pub use domain::{DnssecOutcome, DomainApi};
pub use rrsets::{ApplyOutcome, RrsetApi};
