//! Batch test runner
//!
//! Fans the matrix out as one tokio task per entry, waits for every task to
//! settle, and prints a per-test report plus a passed/total summary. One
//! failing or panicking task never cancels the others.

use std::sync::Arc;

use colored::Colorize;
use futures_util::future::join_all;
use tracing::warn;

use crate::config::TestConfig;
use crate::executor::{run_test, TestResult};
use crate::session::Grid;

/// How one fanned-out invocation settled
#[derive(Debug)]
pub enum Outcome {
    /// The executor produced a result (passed or failed)
    Completed(TestResult),
    /// The task died outside the executor's own recovery
    Crashed(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Completed(result) if result.is_passed())
    }
}

/// Settled outcomes for a full matrix run, in matrix order
#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_passed()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Run every matrix entry concurrently and settle all of them
///
/// Each entry runs as its own tokio task against its own remote session. A
/// panicking task is reported as [`Outcome::Crashed`] with no structured
/// result; the remaining tasks are unaffected.
pub async fn run_all(grid: Arc<dyn Grid>, configs: &[TestConfig]) -> RunSummary {
    let handles: Vec<_> = configs
        .iter()
        .cloned()
        .map(|config| {
            let grid = Arc::clone(&grid);
            tokio::spawn(async move { run_test(grid.as_ref(), &config).await })
        })
        .collect();

    let outcomes = join_all(handles)
        .await
        .into_iter()
        .map(|join| match join {
            Ok(result) => Outcome::Completed(result),
            Err(e) => {
                warn!(error = %e, "test task did not settle cleanly");
                Outcome::Crashed(crash_message(e))
            }
        })
        .collect();

    RunSummary { outcomes }
}

/// Best-effort message for a task that panicked or was cancelled
fn crash_message(error: tokio::task::JoinError) -> String {
    if error.is_panic() {
        let payload = error.into_panic();
        if let Some(s) = payload.downcast_ref::<&str>() {
            format!("task panicked: {s}")
        } else if let Some(s) = payload.downcast_ref::<String>() {
            format!("task panicked: {s}")
        } else {
            "task panicked".to_string()
        }
    } else {
        "task was cancelled".to_string()
    }
}

/// Print the banner for a matrix run
pub fn print_banner(total: usize) {
    println!(
        "\n{} {}",
        "Starting shadow DOM tests".blue().bold(),
        format!("({total} browser/OS combinations)").dimmed()
    );
}

/// Print one line per settled outcome plus the aggregate summary
pub fn print_report(configs: &[TestConfig], summary: &RunSummary) {
    println!("\n{}", "Results:".cyan());

    for (config, outcome) in configs.iter().zip(&summary.outcomes) {
        let identity = format!("{}/{} {}", config.browser, config.os, config.os_version);
        match outcome {
            Outcome::Completed(result) if result.is_passed() => {
                println!("  {} {}: PASSED", "✓".green(), identity);
            }
            Outcome::Completed(result) => {
                println!("  {} {}: FAILED", "✗".red(), identity);
                if let Some(error) = &result.error {
                    println!("    {}", error.dimmed());
                }
            }
            Outcome::Crashed(message) => {
                println!("  {} {}: CRASHED", "✗".red(), identity);
                println!("    {}", message.dimmed());
            }
        }
    }

    let line = format!("{}/{} tests passed", summary.passed(), summary.total());
    if summary.all_passed() {
        println!("\n{}\n", line.green().bold());
    } else {
        println!("\n{}\n", line.red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fake::{FakeBehavior, FakeGrid};
    use crate::executor::TestStatus;

    fn matrix() -> Vec<TestConfig> {
        let entry = |browser: &str, os: &str, os_version: &str| TestConfig {
            browser: browser.to_string(),
            os: os.to_string(),
            os_version: os_version.to_string(),
            target_url: "http://localhost:8000".to_string(),
        };
        vec![
            entry("chrome", "OS X", "Big Sur"),
            entry("chrome", "Windows", "10"),
            entry("safari", "OS X", "Monterey"),
        ]
    }

    #[tokio::test]
    async fn all_passing_matrix_summarizes_clean() {
        let grid = Arc::new(FakeGrid::new(FakeBehavior::default()));
        let summary = run_all(grid.clone(), &matrix()).await;

        assert_eq!(summary.passed(), 3);
        assert_eq!(summary.total(), 3);
        assert!(summary.all_passed());
        // One session per entry, each released exactly once.
        assert_eq!(grid.open_count(), 3);
        assert_eq!(grid.release_count(), 3);
    }

    #[tokio::test]
    async fn one_failure_yields_two_of_three() {
        // Only safari renders the nested text wrong in this scenario.
        let per_browser = PerBrowserGrid {
            good: FakeGrid::new(FakeBehavior::default()),
            bad: FakeGrid::new(FakeBehavior {
                nested_text: "broken".to_string(),
                ..FakeBehavior::default()
            }),
        };

        let summary = run_all(Arc::new(per_browser), &matrix()).await;

        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.total(), 3);
        assert!(!summary.all_passed());

        match &summary.outcomes[2] {
            Outcome::Completed(result) => {
                assert_eq!(result.status, TestStatus::Failed);
                assert_eq!(result.browser, "safari");
            }
            other => panic!("expected a settled failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_crashing_task_does_not_disturb_the_others() {
        let per_browser = PerBrowserGrid {
            good: FakeGrid::new(FakeBehavior::default()),
            bad: FakeGrid::new(FakeBehavior {
                panic_on_open: true,
                ..FakeBehavior::default()
            }),
        };

        let summary = run_all(Arc::new(per_browser), &matrix()).await;

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed(), 2);
        match &summary.outcomes[2] {
            Outcome::Crashed(message) => assert!(message.contains("panicked")),
            other => panic!("expected a crash outcome, got {other:?}"),
        }
        assert!(summary.outcomes[0].is_passed());
        assert!(summary.outcomes[1].is_passed());
    }

    /// Routes safari to a misbehaving grid, everything else to a healthy one
    struct PerBrowserGrid {
        good: FakeGrid,
        bad: FakeGrid,
    }

    #[async_trait::async_trait]
    impl crate::session::Grid for PerBrowserGrid {
        async fn open_session(
            &self,
            request: &crate::session::CapabilityRequest,
        ) -> crate::common::Result<Box<dyn crate::session::Session>> {
            if request.browser == "safari" {
                self.bad.open_session(request).await
            } else {
                self.good.open_session(request).await
            }
        }
    }
}
