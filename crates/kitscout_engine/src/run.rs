use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{stream, StreamExt};
use log::{debug, info, warn};

use kitscout_core::{
    discovery_query, host_within, normalize_analytes, page_matches, site_query, vendor_host,
    AnalyteGroup, ConfigError, FilterConfig, MatchBoard, RunSettings, VendorReport,
};

use crate::{page_text, Fetcher, SearchProvider};

/// One unfetched search result for a vendor/analyte stream. Dispatch follows
/// provider rank within the stream; completion races.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub vendor: String,
    pub canonical: String,
    pub url: String,
}

/// Why the fetch phase stopped dispatching new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every candidate was processed.
    Exhausted,
    /// The wall-clock budget elapsed.
    BudgetElapsed,
    /// The global fetch cap was reached.
    FetchCapReached,
    /// Early-stop fired on the first complete vendor.
    EarlyStop,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Exhausted => "exhausted",
            StopReason::BudgetElapsed => "budget-elapsed",
            StopReason::FetchCapReached => "fetch-cap",
            StopReason::EarlyStop => "early-stop",
        }
    }
}

/// Final result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub vendors: Vec<VendorReport>,
    pub pages_fetched: usize,
    pub elapsed: Duration,
    pub stop: StopReason,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Drives planner -> search -> fetch -> classify -> aggregate for one run,
/// under the wall-clock budget, the fetch cap and the early-stop policy.
pub struct RunController {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn Fetcher>,
    settings: RunSettings,
}

/// Everything a fetch worker needs, shared across the pool.
#[derive(Clone)]
struct WorkerContext {
    fetcher: Arc<dyn Fetcher>,
    board: Arc<MatchBoard>,
    groups: Arc<Vec<AnalyteGroup>>,
    filters: Arc<FilterConfig>,
    stop: Arc<AtomicBool>,
    issued: Arc<AtomicUsize>,
    max_fetch: usize,
    deadline: Instant,
}

enum CandidateOutcome {
    Skipped,
    CapExhausted,
    DeadlinePassed,
    NoMatch,
    Matched { vendor: String, completed: bool },
}

impl RunController {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn Fetcher>,
        settings: RunSettings,
    ) -> Self {
        Self {
            search,
            fetcher,
            settings,
        }
    }

    /// Runs the whole pipeline and produces the final report.
    ///
    /// Only configuration problems are errors; search and fetch failures
    /// degrade to missing candidates or non-matches, and budget/cap
    /// exhaustion simply truncates the run.
    pub async fn run(&self) -> Result<RunOutcome, RunError> {
        self.settings.validate()?;
        let started = Instant::now();
        let deadline = started + self.settings.budget;
        let groups = normalize_analytes(&self.settings.analytes);

        let vendors = if self.settings.discover_domains {
            info!("Mode: discover domains (web-wide).");
            let discovered = self.discover_vendors(&groups, deadline).await;
            info!("Discovered {} candidate vendor domains.", discovered.len());
            if discovered.is_empty() {
                return Err(ConfigError::NoVendors.into());
            }
            discovered
        } else {
            let vendors = self.settings.resolved_domains();
            info!("Mode: {} vendor domains.", vendors.len());
            vendors
        };

        let candidates = self.collect_candidates(&vendors, &groups, deadline).await;
        info!("Collected {} candidate pages.", candidates.len());

        let board = Arc::new(MatchBoard::new(
            groups.iter().map(|g| g.canonical().to_string()),
        ));
        let context = WorkerContext {
            fetcher: Arc::clone(&self.fetcher),
            board: Arc::clone(&board),
            groups: Arc::new(groups),
            filters: Arc::new(self.settings.filters.clone()),
            stop: Arc::new(AtomicBool::new(false)),
            issued: Arc::new(AtomicUsize::new(0)),
            max_fetch: self.settings.max_fetch,
            deadline,
        };

        let stop = self.fetch_and_classify(candidates, &context).await;

        let pages_fetched = context.issued.load(Ordering::Relaxed).min(context.max_fetch);
        info!(
            "Done: {} pages fetched, {} complete vendors, stop reason {}.",
            pages_fetched,
            board.complete_vendor_count(),
            stop.as_str()
        );
        Ok(RunOutcome {
            vendors: board.report(),
            pages_fetched,
            elapsed: started.elapsed(),
            stop,
        })
    }

    /// Unrestricted discovery searches, harvesting result hosts as vendors.
    async fn discover_vendors(
        &self,
        groups: &[AnalyteGroup],
        deadline: Instant,
    ) -> BTreeSet<String> {
        let species = self.settings.primary_species();
        let mut found = BTreeSet::new();
        for group in groups {
            if Instant::now() >= deadline {
                break;
            }
            let query = discovery_query(group, &species);
            match self.search.search(&query, self.settings.seed_results).await {
                Ok(urls) => {
                    for url in urls {
                        if let Some(host) = vendor_host(&url) {
                            found.insert(host);
                        }
                    }
                }
                Err(err) => warn!("Discovery search failed for {}: {err}", group.canonical()),
            }
        }
        found
    }

    /// One `site:` query per vendor x analyte pair; results are filtered to
    /// the vendor's own host and deduplicated per stream, preserving rank
    /// order. Streams are independent: the same URL appearing under two
    /// analytes is fetched once per stream.
    async fn collect_candidates(
        &self,
        vendors: &BTreeSet<String>,
        groups: &[AnalyteGroup],
        deadline: Instant,
    ) -> Vec<Candidate> {
        let species = self.settings.primary_species();
        let mut candidates = Vec::new();
        'vendors: for vendor in vendors {
            for group in groups {
                if Instant::now() >= deadline {
                    break 'vendors;
                }
                let query = site_query(vendor, group, &species);
                let urls = match self
                    .search
                    .search(&query.text, self.settings.site_results)
                    .await
                {
                    Ok(urls) => urls,
                    Err(err) => {
                        warn!("Search failed for {:?}: {err}", query.text);
                        continue;
                    }
                };
                let mut seen = BTreeSet::new();
                for url in urls {
                    let Some(host) = vendor_host(&url) else {
                        continue;
                    };
                    if !host_within(&host, vendor) {
                        continue;
                    }
                    if !seen.insert(url.clone()) {
                        continue;
                    }
                    candidates.push(Candidate {
                        vendor: vendor.clone(),
                        canonical: group.canonical().to_string(),
                        url,
                    });
                }
            }
        }
        candidates
    }

    /// Dispatches candidates through a bounded pool and folds outcomes into
    /// the board. Once a stop condition fires, the stream is drained rather
    /// than dropped: queued candidates short-circuit before their GET and
    /// in-flight fetches finish or time out naturally.
    async fn fetch_and_classify(
        &self,
        candidates: Vec<Candidate>,
        context: &WorkerContext,
    ) -> StopReason {
        let mut outcomes = stream::iter(candidates.into_iter().map(|candidate| {
            let context = context.clone();
            async move { process_candidate(candidate, context).await }
        }))
        .buffer_unordered(self.settings.workers);

        let mut stop_reason = StopReason::Exhausted;
        while let Some(outcome) = outcomes.next().await {
            match outcome {
                CandidateOutcome::Matched { vendor, completed } => {
                    if completed {
                        info!("Vendor {vendor} matched every analyte.");
                        if self.settings.early_stop {
                            context.stop.store(true, Ordering::Relaxed);
                            set_reason(&mut stop_reason, StopReason::EarlyStop);
                        }
                    }
                }
                CandidateOutcome::CapExhausted => {
                    context.stop.store(true, Ordering::Relaxed);
                    set_reason(&mut stop_reason, StopReason::FetchCapReached);
                }
                CandidateOutcome::DeadlinePassed => {
                    context.stop.store(true, Ordering::Relaxed);
                    set_reason(&mut stop_reason, StopReason::BudgetElapsed);
                }
                CandidateOutcome::Skipped | CandidateOutcome::NoMatch => {}
            }
        }
        stop_reason
    }
}

// The first stop condition to fire names the run's stop reason.
fn set_reason(current: &mut StopReason, reason: StopReason) {
    if *current == StopReason::Exhausted {
        *current = reason;
    }
}

/// Guard order before the GET: stop flag -> deadline -> already-matched
/// stream -> fetch-cap reservation. A reserved slot is consumed even when
/// the fetch then fails, so total GETs never exceed the cap.
async fn process_candidate(candidate: Candidate, context: WorkerContext) -> CandidateOutcome {
    if context.stop.load(Ordering::Relaxed) {
        return CandidateOutcome::Skipped;
    }
    if Instant::now() >= context.deadline {
        return CandidateOutcome::DeadlinePassed;
    }
    if context.board.is_matched(&candidate.vendor, &candidate.canonical) {
        return CandidateOutcome::Skipped;
    }
    if context.issued.fetch_add(1, Ordering::Relaxed) >= context.max_fetch {
        return CandidateOutcome::CapExhausted;
    }

    let output = match context.fetcher.fetch(&candidate.url).await {
        Ok(output) => output,
        Err(err) => {
            debug!("Fetch failed for {}: {err}", candidate.url);
            return CandidateOutcome::NoMatch;
        }
    };

    let Some(group) = context
        .groups
        .iter()
        .find(|g| g.canonical() == candidate.canonical)
    else {
        return CandidateOutcome::Skipped;
    };

    let text = page_text(&output.bytes, output.content_type.as_deref());
    if !page_matches(&text.content(), &output.final_url, group, &context.filters) {
        return CandidateOutcome::NoMatch;
    }

    let recorded = context
        .board
        .record(&candidate.vendor, &candidate.canonical, &output.final_url);
    if !recorded.newly_matched {
        // Another worker won the stream while this fetch was in flight.
        return CandidateOutcome::Skipped;
    }
    debug!(
        "Matched {} for {} at {}",
        candidate.canonical, candidate.vendor, output.final_url
    );
    CandidateOutcome::Matched {
        vendor: candidate.vendor,
        completed: recorded.vendor_completed,
    }
}
