//! shadowgrid - cross-browser shadow DOM smoke tester
//!
//! Runs the built-in browser matrix against a remote automation grid and
//! exits nonzero if any combination fails to render the expected shadow DOM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use shadowgrid::session::RemoteGrid;
use shadowgrid::{common, runner, Credentials, Matrix};

#[derive(Parser)]
#[command(name = "shadowgrid", about = "Cross-browser shadow DOM smoke tester")]
#[command(version, long_about = None)]
struct Cli {
    /// Page to test; overrides the target URL of every matrix entry
    url: Option<String>,

    /// TOML file describing a custom browser matrix
    #[arg(long)]
    matrix: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    common::logging::init_cli();

    let cli = Cli::parse();

    // Credentials are validated before any test launches.
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let matrix = match &cli.matrix {
        Some(path) => match Matrix::load(path) {
            Ok(matrix) => matrix,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Matrix::default(),
    };
    let matrix = match &cli.url {
        Some(url) => matrix.with_target_url(url),
        None => matrix,
    };

    let grid = Arc::new(RemoteGrid::new(&credentials));

    runner::print_banner(matrix.tests.len());
    let summary = runner::run_all(grid, &matrix.tests).await;
    runner::print_report(&matrix.tests, &summary);

    if !summary.all_passed() {
        std::process::exit(1);
    }
}
