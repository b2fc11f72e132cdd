//! HTTP client for the deSEC API.
//!
//! This crate provides [`DesecClient`], bound to a single zone, with the
//! RRset replace/create protocol ([`api::RrsetApi::apply`]) and the DNSSEC
//! toggle ([`api::DomainApi::enable_dnssec`]).

#![doc(html_root_url = "https://docs.rs/desec-client/0.3.0")]

mod client;
mod config;
pub mod api;

pub use api::{ApplyOutcome, DnssecOutcome};
pub use client::{DesecClient, DesecClientBuilder, DEFAULT_BASE_URL};
pub use config::*;
pub use desec_core::{DesecError, Result};
