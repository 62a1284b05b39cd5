//! Typed conversion of raw argument strings

pub mod converter;
pub mod error;

pub use converter::{ValueConverter, render};
pub use error::{ConversionError, type_hint};
