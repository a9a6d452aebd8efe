use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

/// Outcome of recording a match into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    /// False when the analyte already had a URL; the earlier one stands.
    pub newly_matched: bool,
    /// True when this call gave the vendor its last missing analyte.
    pub vendor_completed: bool,
}

/// Per-vendor section of the final run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorReport {
    pub vendor: String,
    pub complete: bool,
    /// Canonical analyte name -> first matched URL.
    pub matches: BTreeMap<String, String>,
}

/// Thread-safe vendor -> analyte -> first-matched-URL map.
///
/// Entries are monotonic: once an analyte is matched for a vendor the URL is
/// final. Concurrent workers race through [`MatchBoard::record`]; the first
/// recorded match wins and later ones report `newly_matched: false`.
pub struct MatchBoard {
    required: Vec<String>,
    inner: Mutex<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MatchBoard {
    /// `required` lists every canonical analyte a vendor must match to count
    /// as complete.
    pub fn new(required: impl IntoIterator<Item = String>) -> Self {
        Self {
            required: required.into_iter().collect(),
            inner: Mutex::new(BTreeMap::new()),
        }
    }

    /// Records `url` for (vendor, analyte) unless the pair is already
    /// matched, and reports whether the vendor just became complete.
    pub fn record(&self, vendor: &str, canonical: &str, url: &str) -> Recorded {
        let mut map = self.lock();
        let state = map.entry(vendor.to_string()).or_default();
        if state.contains_key(canonical) {
            return Recorded {
                newly_matched: false,
                vendor_completed: false,
            };
        }
        state.insert(canonical.to_string(), url.to_string());
        let vendor_completed = self.required.iter().all(|a| state.contains_key(a));
        Recorded {
            newly_matched: true,
            vendor_completed,
        }
    }

    /// Lets workers skip fetches for a stream that is already satisfied.
    pub fn is_matched(&self, vendor: &str, canonical: &str) -> bool {
        self.lock()
            .get(vendor)
            .is_some_and(|state| state.contains_key(canonical))
    }

    pub fn complete_vendor_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|state| self.required.iter().all(|a| state.contains_key(a)))
            .count()
    }

    /// Snapshot of every vendor with at least one match, sorted by domain.
    pub fn report(&self) -> Vec<VendorReport> {
        self.lock()
            .iter()
            .map(|(vendor, matches)| VendorReport {
                vendor: vendor.clone(),
                complete: self.required.iter().all(|a| matches.contains_key(a)),
                matches: matches.clone(),
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, BTreeMap<String, String>>> {
        // A poisoned lock only means another worker panicked mid-record;
        // the map itself is still consistent (inserts are atomic).
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
