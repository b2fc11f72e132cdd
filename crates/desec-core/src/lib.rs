//! Core types for the deSEC record reconciler.
//!
//! This crate provides the pieces that never touch the network:
//!
//! - **Types**: [`RecordDocument`] (one parsed record file), [`RecordType`]
//!   and [`RecordGroup`] (the RRset payload sent to deSEC)
//! - **Normalization**: [`normalize_group`] and [`normalize_document`]
//! - **Errors**: [`DesecError`] and the crate-wide [`Result`]
//!
//! # Example
//!
//! ```rust,ignore
//! use desec_core::{normalize_document, RecordDocument, Result};
//!
//! fn plan(text: &str) -> Result<()> {
//!     let doc = RecordDocument::from_json("www.json", text)?;
//!     for group in normalize_document(&doc)? {
//!         println!("{} {} {:?}", group.subname, group.record_type, group.records);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/desec-core/0.3.0")]

mod error;
mod normalize;
pub mod types;

pub use error::{DesecError, Result};
pub use normalize::{normalize_document, normalize_group, normalize_value, validate_subname};
pub use types::*;
