//! KitScout engine: search, fetch and the concurrent matching pipeline.
mod extract;
mod fetch;
mod run;
mod search;

pub use extract::{page_text, PageText};
pub use fetch::{
    FetchError, FetchFailure, FetchOutput, FetchSettings, Fetcher, ReqwestFetcher,
    DEFAULT_USER_AGENT,
};
pub use run::{Candidate, RunController, RunError, RunOutcome, StopReason};
pub use search::{DdgHtmlSearch, SearchError, SearchProvider, DDG_HTML_ENDPOINT};
