//! Single-test executor
//!
//! Runs the fixed navigate-and-assert sequence against one browser/OS
//! combination. All failures are recovered into a [`TestResult`]; the remote
//! session is released on every exit path.

use std::time::Duration;

use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::config::TestConfig;
use crate::session::{CapabilityRequest, Grid, Session};

/// Session-wide implicit element wait
const IMPLICIT_WAIT: Duration = Duration::from_secs(10);

/// Session-wide page load timeout
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll window for each located element
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Expected text of the element inside the outer shadow root
pub const TARGET_TEXT: &str = "Here is the target element!";

/// Expected text of the element inside the nested shadow root
pub const NESTED_TARGET_TEXT: &str = "Nested shadow element for testing!";

/// Outcome of one executor invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    Failed,
}

/// Result of one test, never mutated after construction
#[derive(Debug, Clone)]
pub struct TestResult {
    pub status: TestStatus,
    pub browser: String,
    pub os: String,
    pub error: Option<String>,
}

impl TestResult {
    fn passed(config: &TestConfig) -> Self {
        Self {
            status: TestStatus::Passed,
            browser: config.browser.clone(),
            os: config.os.clone(),
            error: None,
        }
    }

    fn failed(config: &TestConfig, error: Error) -> Self {
        Self {
            status: TestStatus::Failed,
            browser: config.browser.clone(),
            os: config.os.clone(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Run the shadow DOM smoke test for one matrix entry
///
/// Never returns an error: any failure (session setup, navigation, a missed
/// poll window, a text mismatch) is captured as a `Failed` result carrying
/// the message.
pub async fn run_test(grid: &dyn Grid, config: &TestConfig) -> TestResult {
    info!(browser = %config.browser, os = %config.os, "starting test");

    match check_shadow_dom(grid, config).await {
        Ok(()) => {
            info!(browser = %config.browser, os = %config.os, "test passed");
            TestResult::passed(config)
        }
        Err(e) => {
            info!(browser = %config.browser, os = %config.os, error = %e, "test failed");
            TestResult::failed(config, e)
        }
    }
}

/// Acquire a session, run the assertions, and release the session on every
/// path. A release failure after a passing run still fails the test.
async fn check_shadow_dom(grid: &dyn Grid, config: &TestConfig) -> Result<()> {
    let request = CapabilityRequest::for_test(config);
    let session = grid.open_session(&request).await?;

    let verdict = verify_page(&*session, &config.target_url).await;
    let released = session.release().await;

    verdict.and(released)
}

async fn verify_page(session: &dyn Session, url: &str) -> Result<()> {
    session
        .configure_timeouts(IMPLICIT_WAIT, PAGE_LOAD_TIMEOUT)
        .await?;
    session.navigate(url).await?;

    // The shadow hosts live inside an iframe; shadow roots themselves are
    // not frame boundaries, so one switch suffices.
    session.enter_iframe(ELEMENT_TIMEOUT).await?;

    let root = session.shadow_root("shadow-host", ELEMENT_TIMEOUT).await?;
    let text = root.text_of("target-element").await?;
    debug!(%text, "outer shadow element text");
    if text != TARGET_TEXT {
        return Err(Error::text_mismatch(TARGET_TEXT, &text));
    }

    let nested = root.shadow_root("nested-shadow-host").await?;
    let nested_text = nested.text_of("nested-target").await?;
    debug!(%nested_text, "nested shadow element text");
    if nested_text != NESTED_TARGET_TEXT {
        return Err(Error::text_mismatch(NESTED_TARGET_TEXT, &nested_text));
    }

    Ok(())
}
