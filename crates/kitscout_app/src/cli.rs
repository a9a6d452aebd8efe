use std::time::Duration;

use clap::Parser;

use kitscout_core::{FilterConfig, RunSettings};
use kitscout_engine::{FetchSettings, DEFAULT_USER_AGENT};

/// Finds vendor product pages for ELISA kits matching the requested analytes.
#[derive(Debug, Parser)]
#[command(name = "kitscout", version, about)]
pub struct Cli {
    /// Target biomarkers.
    #[arg(long, num_args = 1.., default_values_t = [String::from("NOX4"), String::from("CXCL10")])]
    pub analytes: Vec<String>,

    /// Species vocabulary, used in query text and for filtering.
    #[arg(long, num_args = 1.., default_values_t = [String::from("mouse")])]
    pub species: Vec<String>,

    /// Sample-type vocabulary for filtering.
    #[arg(long, num_args = 0.., default_values_t = [String::from("serum"), String::from("plasma")])]
    pub sample: Vec<String>,

    /// Override the trusted vendor domain list.
    #[arg(long, num_args = 1..)]
    pub domains: Option<Vec<String>>,

    /// Populate the vendor list with an unrestricted discovery search first.
    #[arg(long)]
    pub discover_domains: bool,

    /// Search results requested per discovery query.
    #[arg(long, default_value_t = 30)]
    pub seed_results: usize,

    /// Max search results requested per site query.
    #[arg(long, default_value_t = 20)]
    pub site_results: usize,

    /// Global cap on total page fetches.
    #[arg(long, default_value_t = 60)]
    pub max_fetch: usize,

    /// Fetcher pool size.
    #[arg(long, default_value_t = 12)]
    pub workers: usize,

    /// Hard wall-clock deadline for the whole run, in seconds.
    #[arg(long, default_value_t = 40)]
    pub budget_sec: u64,

    /// Per-page HTTP timeout, in seconds.
    #[arg(long, default_value_t = 12)]
    pub timeout: u64,

    /// HTTP User-Agent header.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub ua: String,

    /// Stop the whole run at the first fully-matched vendor.
    #[arg(long)]
    pub early_stop: bool,

    /// Only accept pages mentioning a configured species term.
    #[arg(long)]
    pub require_species: bool,

    /// Only accept pages mentioning a configured sample type.
    #[arg(long)]
    pub require_samples: bool,

    /// Only accept pages mentioning the ELISA keyword.
    #[arg(long)]
    pub require_elisa: bool,

    /// One of: off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            analytes: self.analytes.clone(),
            domains: self.domains.clone(),
            discover_domains: self.discover_domains,
            seed_results: self.seed_results,
            site_results: self.site_results,
            max_fetch: self.max_fetch,
            workers: self.workers,
            budget: Duration::from_secs(self.budget_sec),
            filters: FilterConfig {
                species_terms: self.species.clone(),
                sample_terms: self.sample.clone(),
                require_species: self.require_species,
                require_samples: self.require_samples,
                require_elisa: self.require_elisa,
            },
            early_stop: self.early_stop,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout),
            user_agent: self.ua.clone(),
            ..FetchSettings::default()
        }
    }
}
