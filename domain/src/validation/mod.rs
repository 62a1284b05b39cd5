//! Parameter validation
//!
//! Enum and format constraints are checked inline while converting a value
//! (see [`crate::convert`]); the required check runs once over the complete
//! converted parameter map.

pub mod constraints;
pub mod required;

pub use constraints::{StringFormat, describe_enum, enum_contains};
pub use required::validate_required;
