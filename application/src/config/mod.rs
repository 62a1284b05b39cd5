//! Application-level configuration.
//!
//! - [`ExecutionParams`]: deadlines for completion, schema fetch and connect

pub mod execution_params;

pub use execution_params::ExecutionParams;
