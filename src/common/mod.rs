//! Common functionality shared across the crate

pub mod error;
pub mod logging;

pub use error::{Error, Result};
