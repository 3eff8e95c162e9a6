//! Error types for the shadow DOM smoke tester
//!
//! Per-test failures are recovered into `TestResult` data by the executor;
//! only missing credentials abort the process.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke tester
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Invalid matrix file: {0}")]
    MatrixParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Session Errors ===
    #[error("Failed to open remote session for {browser}/{os}: {error}")]
    SessionStart {
        browser: String,
        os: String,
        error: String,
    },

    #[error("Navigation to '{url}' failed: {error}")]
    Navigation { url: String, error: String },

    // === Page Check Errors ===
    #[error("Element '{selector}' not found within {timeout_ms}ms")]
    ElementNotFound { selector: String, timeout_ms: u64 },

    #[error("Element '{selector}' not found in shadow root")]
    ShadowElementNotFound { selector: String },

    #[error("Element '{selector}' has no shadow root")]
    NoShadowRoot { selector: String },

    #[error("Text mismatch. Expected: \"{expected}\", Got: \"{actual}\"")]
    TextMismatch { expected: String, actual: String },

    // === WebDriver Errors ===
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an element-not-found error for a selector and poll window
    pub fn element_not_found(selector: &str, timeout: std::time::Duration) -> Self {
        Self::ElementNotFound {
            selector: selector.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Create a text mismatch error carrying both strings
    pub fn text_mismatch(expected: &str, actual: &str) -> Self {
        Self::TextMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
