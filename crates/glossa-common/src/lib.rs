//! # Glossa Common
//!
//! Shared types, utilities, and common functionality for Glossa.
//!
//! This crate provides the language settings, request selectors and locale
//! helpers used across all other crates in the Glossa workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
