//! KitScout core: pure matching logic, no I/O.
mod aggregate;
mod analyte;
mod classify;
mod config;
mod plan;
mod vendor;

pub use aggregate::{MatchBoard, Recorded, VendorReport};
pub use analyte::{normalize_analytes, AnalyteGroup};
pub use classify::{
    page_matches, ElisaPredicate, FilterConfig, SamplePredicate, SpeciesPredicate, TextPredicate,
};
pub use config::{ConfigError, RunSettings};
pub use plan::{discovery_query, plan_site_queries, site_query, PlannedQuery};
pub use vendor::{default_domains, host_within, normalize_domain, vendor_host, DEFAULT_DOMAINS};
