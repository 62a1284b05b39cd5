//! Core domain concepts shared across all subdomains.
//!
//! - [`error::SchemaError`]: raw schema intake failures
//! - [`error::ParamError`]: argument parsing, conversion and validation failures

pub mod error;
