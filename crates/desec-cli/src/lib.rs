//! # desec-cli
//!
//! Command-line entry point that applies a directory of JSON record
//! definitions to a deSEC zone.
//!
//! ## Features
//!
//! - **Zero-flag runs**: `DESEC_TOKEN=... desec-apply` applies `./records`
//! - **Replace-or-create**: existing RRsets are replaced, missing ones created
//! - **DNSSEC**: turned on once per run, best effort
//! - **Dry run**: `--dry-run` validates every document without calling the API

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
