//! Record directory reconciliation for deSEC.
//!
//! [`loader`] reads the `*.json` record documents; [`Syncer`] drives them
//! through normalization and the client's replace-or-create protocol.

#![doc(html_root_url = "https://docs.rs/desec-sync/0.3.0")]

mod driver;
pub mod loader;

pub use driver::{plan, NoopObserver, SyncObserver, SyncOptions, SyncSummary, Syncer};
