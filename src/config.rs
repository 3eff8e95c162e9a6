//! Test matrix and credential configuration
//!
//! Credentials are read from the environment exactly once at startup and
//! carried as an explicit struct; nothing else consults ambient globals.

use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::common::{Error, Result};

/// Environment variable holding the grid username
pub const USERNAME_VAR: &str = "BROWSERSTACK_USERNAME";

/// Environment variable holding the grid access key
pub const ACCESS_KEY_VAR: &str = "BROWSERSTACK_ACCESS_KEY";

/// Page exercised when no URL is given on the command line
pub const DEFAULT_TARGET_URL: &str = "http://localhost:8000";

/// Credentials for the remote automation grid
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub access_key: String,
}

impl Credentials {
    /// Read credentials from the process environment
    ///
    /// Fails with [`Error::MissingCredential`] naming the first absent
    /// variable. Called once at startup, before any test launches.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var(USERNAME_VAR).ok(), env::var(ACCESS_KEY_VAR).ok())
    }

    fn from_vars(username: Option<String>, access_key: Option<String>) -> Result<Self> {
        let username = username
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(USERNAME_VAR))?;
        let access_key = access_key
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(ACCESS_KEY_VAR))?;
        Ok(Self {
            username,
            access_key,
        })
    }
}

/// One browser/OS combination to smoke-test
#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    /// Browser name as the grid expects it (e.g. "chrome", "safari")
    pub browser: String,
    /// Operating system (e.g. "OS X", "Windows")
    pub os: String,
    /// OS version label (e.g. "Big Sur", "10")
    pub os_version: String,
    /// Page under test
    #[serde(default = "default_target_url")]
    pub target_url: String,
}

fn default_target_url() -> String {
    DEFAULT_TARGET_URL.to_string()
}

/// The browser matrix to run
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Matrix entries, one per remote session
    pub tests: Vec<TestConfig>,
}

impl Matrix {
    /// Load a matrix from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::MatrixParse(e.to_string()))
    }

    /// Point every entry at `url` instead of its configured target
    pub fn with_target_url(mut self, url: &str) -> Self {
        for test in &mut self.tests {
            test.target_url = url.to_string();
        }
        self
    }
}

impl Default for Matrix {
    /// The built-in matrix: Chrome on OS X and Windows, plus Safari
    fn default() -> Self {
        let entry = |browser: &str, os: &str, os_version: &str| TestConfig {
            browser: browser.to_string(),
            os: os.to_string(),
            os_version: os_version.to_string(),
            target_url: DEFAULT_TARGET_URL.to_string(),
        };
        Self {
            tests: vec![
                entry("chrome", "OS X", "Big Sur"),
                entry("chrome", "Windows", "10"),
                entry("safari", "OS X", "Monterey"),
            ],
        }
    }
}
