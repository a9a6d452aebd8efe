//! `kitscout` binary: CLI parsing, logging setup and report printing.
mod cli;
mod report;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::error;

use kitscout_engine::{DdgHtmlSearch, FetchError, ReqwestFetcher, RunController, RunError, SearchError};

use crate::cli::Cli;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("could not build HTTP client: {0}")]
    Fetcher(#[from] FetchError),
    #[error("could not build search client: {0}")]
    Search(#[from] SearchError),
    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let _ = scout_logging::initialize_terminal(scout_logging::level_from_str(&args.log_level));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), AppError> {
    let search = Arc::new(DdgHtmlSearch::new(
        Duration::from_secs(args.timeout),
        &args.ua,
    )?);
    let fetcher = Arc::new(ReqwestFetcher::new(args.fetch_settings())?);
    let controller = RunController::new(search, fetcher, args.run_settings());

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(controller.run())?;

    if args.json {
        println!("{}", report::to_json(&outcome));
    } else {
        report::print_text(&outcome);
    }
    Ok(())
}
