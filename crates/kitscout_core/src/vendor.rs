use std::collections::BTreeSet;

use url::Url;

/// Trusted ELISA kit vendors, manufacturers and distributors.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "fn-test.com",
    "novusbio.com",
    "krishgen.com",
    "novateinbio.com",
    "rndsystems.com",
    "bio-techne.com",
    "abcam.com",
    "thermofisher.com",
    "sigmaaldrich.com",
    "merckmillipore.com",
    "mybiosource.com",
    "antibodies-online.com",
    "lsbio.com",
    "assaygenie.com",
    "cloud-clone.com",
    "cusabio.com",
    "elabscience.com",
    "biomatik.com",
    "lifespanbio.com",
    "sino-biological.com",
    "raybiotech.com",
    "bosterbio.com",
    "genetex.com",
    "fishersci.com",
    "vwr.com",
];

/// The built-in trusted vendor list as a normalized set.
pub fn default_domains() -> BTreeSet<String> {
    DEFAULT_DOMAINS.iter().map(|d| normalize_domain(d)).collect()
}

/// Lowercases a domain and strips a leading `www.`.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    lowered.trim_start_matches("www.").to_string()
}

/// Extracts the normalized host of an absolute http(s) URL.
pub fn vendor_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return None,
    }
    parsed.host_str().map(normalize_domain)
}

/// True when `host` is `domain` itself or one of its subdomains.
pub fn host_within(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}
