//! # Glossa Host
//!
//! Console host for the Glossa localization engine.
//!
//! Loads the configuration and text catalog, keeps a small tree of console
//! labels bound to catalog entries, and drives language changes from
//! commands read on stdin.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod command;
pub mod console;
pub mod error;
pub mod logging;

pub use app::*;
pub use command::*;
pub use console::*;
pub use error::*;
pub use logging::*;
