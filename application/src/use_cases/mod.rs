//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod complete;
pub mod exec_tool;
pub mod load_metadata;
pub mod manage_cache;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
