use std::collections::BTreeSet;
use std::time::Duration;

use crate::{default_domains, normalize_analytes, normalize_domain, FilterConfig};

/// Fatal configuration problems, detected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no analytes requested")]
    NoAnalytes,
    #[error("no vendor domains to search and domain discovery is disabled")]
    NoVendors,
    #[error("fetch worker count must be at least 1")]
    NoWorkers,
}

/// Everything one run needs, resolved from the CLI before the pipeline
/// starts. Discarded when the report is produced; nothing persists between
/// invocations.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub analytes: Vec<String>,
    /// `None` selects the built-in trusted vendor list.
    pub domains: Option<Vec<String>>,
    pub discover_domains: bool,
    /// Results requested per unrestricted discovery query.
    pub seed_results: usize,
    /// Results requested per `site:` query.
    pub site_results: usize,
    /// Global cap on pages fetched across the whole run.
    pub max_fetch: usize,
    /// Fetcher pool size.
    pub workers: usize,
    /// Hard wall-clock deadline for the whole run.
    pub budget: Duration,
    pub filters: FilterConfig,
    pub early_stop: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            analytes: vec!["NOX4".to_string(), "CXCL10".to_string()],
            domains: None,
            discover_domains: false,
            seed_results: 30,
            site_results: 20,
            max_fetch: 60,
            workers: 12,
            budget: Duration::from_secs(40),
            filters: FilterConfig {
                species_terms: vec!["mouse".to_string()],
                sample_terms: vec!["serum".to_string(), "plasma".to_string()],
                ..FilterConfig::default()
            },
            early_stop: false,
        }
    }
}

impl RunSettings {
    /// Validates the settings. An error here aborts the run before any
    /// network I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize_analytes(&self.analytes).is_empty() {
            return Err(ConfigError::NoAnalytes);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if !self.discover_domains && self.resolved_domains().is_empty() {
            return Err(ConfigError::NoVendors);
        }
        Ok(())
    }

    /// The vendor set to search: the user override when given, otherwise the
    /// built-in list. Empty when discovery is expected to fill it in.
    pub fn resolved_domains(&self) -> BTreeSet<String> {
        match &self.domains {
            Some(domains) => domains
                .iter()
                .map(|d| normalize_domain(d))
                .filter(|d| !d.is_empty())
                .collect(),
            None if self.discover_domains => BTreeSet::new(),
            None => default_domains(),
        }
    }

    /// The species term woven into query text (the first configured one).
    pub fn primary_species(&self) -> String {
        self.filters
            .species_terms
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}
