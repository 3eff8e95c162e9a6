//! Cross-browser shadow DOM smoke tester
//!
//! Drives a remote WebDriver grid to verify that a page's shadow DOM —
//! including a nested shadow root inside an iframe — renders the expected
//! text across a small browser/OS matrix.

pub mod common;
pub mod config;
pub mod executor;
pub mod runner;
pub mod session;

// Re-export commonly used types
pub use common::{Error, Result};
pub use config::{Credentials, Matrix, TestConfig};
pub use executor::{run_test, TestResult, TestStatus};
pub use runner::{run_all, Outcome, RunSummary};
