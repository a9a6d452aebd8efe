use crate::AnalyteGroup;

/// Active filter configuration for page classification.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub species_terms: Vec<String>,
    pub sample_terms: Vec<String>,
    pub require_species: bool,
    pub require_samples: bool,
    pub require_elisa: bool,
}

/// A swappable yes/no detector over extracted page text.
pub trait TextPredicate: Send + Sync {
    fn matches(&self, text: &str) -> bool;
}

/// Detects any configured species term.
///
/// `mouse` also accepts the common synonyms `mus musculus` and `mice`.
/// An empty vocabulary matches every page.
#[derive(Debug, Clone)]
pub struct SpeciesPredicate {
    terms: Vec<String>,
}

impl SpeciesPredicate {
    pub fn new(terms: &[String]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.trim().to_lowercase()).collect(),
        }
    }
}

impl TextPredicate for SpeciesPredicate {
    fn matches(&self, text: &str) -> bool {
        if self.terms.iter().all(|t| t.is_empty()) {
            return true;
        }
        let lowered = text.to_lowercase();
        self.terms.iter().any(|term| {
            !term.is_empty()
                && (lowered.contains(term.as_str())
                    || (term == "mouse"
                        && (lowered.contains("mus musculus") || lowered.contains("mice"))))
        })
    }
}

/// Detects any configured sample-type term (serum, plasma, ...).
/// An empty vocabulary matches every page.
#[derive(Debug, Clone)]
pub struct SamplePredicate {
    terms: Vec<String>,
}

impl SamplePredicate {
    pub fn new(terms: &[String]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.trim().to_lowercase()).collect(),
        }
    }
}

impl TextPredicate for SamplePredicate {
    fn matches(&self, text: &str) -> bool {
        if self.terms.iter().all(|t| t.is_empty()) {
            return true;
        }
        let lowered = text.to_lowercase();
        self.terms
            .iter()
            .any(|term| !term.is_empty() && lowered.contains(term.as_str()))
    }
}

/// Detects the literal `elisa` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElisaPredicate;

impl TextPredicate for ElisaPredicate {
    fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains("elisa")
    }
}

/// Classifies one page against an analyte group and the active filters.
///
/// The analyte counts if it appears in the page content *or* in the URL
/// (product slugs often carry the analyte name). The *required* filters run
/// on the page content only; a term in the URL slug never satisfies them.
///
/// Pure function of (content, url, config): the same inputs always produce
/// the same verdict. A `false` is a negative result, not an error.
pub fn page_matches(content: &str, url: &str, group: &AnalyteGroup, filters: &FilterConfig) -> bool {
    if !group.found_in(content) && !group.found_in(url) {
        return false;
    }
    if filters.require_species && !SpeciesPredicate::new(&filters.species_terms).matches(content) {
        return false;
    }
    if filters.require_samples && !SamplePredicate::new(&filters.sample_terms).matches(content) {
        return false;
    }
    if filters.require_elisa && !ElisaPredicate.matches(content) {
        return false;
    }
    true
}
