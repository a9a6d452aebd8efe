use regex::Regex;

/// Known alternate designations for analytes, keyed by canonical name.
/// Lookup is case-insensitive in both directions: a request for `IP-10`
/// resolves to the `CXCL10` group.
const ALIAS_TABLE: &[(&str, &[&str])] = &[(
    "CXCL10",
    &[
        "IP-10",
        "IP10",
        "CRG-2",
        "CRG2",
        "interferon gamma induced protein 10",
    ],
)];

/// A canonical analyte name together with its known aliases.
///
/// Detection matches any member of the group as a whole word,
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct AnalyteGroup {
    canonical: String,
    aliases: Vec<String>,
    patterns: Vec<Regex>,
}

impl AnalyteGroup {
    fn new(canonical: String, aliases: Vec<String>) -> Self {
        let patterns = std::iter::once(canonical.as_str())
            .chain(aliases.iter().map(String::as_str))
            .filter_map(|member| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(member))).ok()
            })
            .collect();
        Self {
            canonical,
            aliases,
            patterns,
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whole-word, case-insensitive test for any member of the group.
    pub fn found_in(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// Builds one [`AnalyteGroup`] per requested analyte.
///
/// Trims input, drops empty names, and deduplicates requests that resolve to
/// the same canonical name. Names not present in the alias table become their
/// own singleton group.
pub fn normalize_analytes(names: &[String]) -> Vec<AnalyteGroup> {
    let mut groups: Vec<AnalyteGroup> = Vec::new();
    for raw in names {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        let canonical = canonical_for(name);
        if groups
            .iter()
            .any(|g| g.canonical.eq_ignore_ascii_case(&canonical))
        {
            continue;
        }
        let aliases = ALIAS_TABLE
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(&canonical))
            .map(|(_, list)| list.iter().map(|s| (*s).to_string()).collect())
            .unwrap_or_default();
        groups.push(AnalyteGroup::new(canonical, aliases));
    }
    groups
}

fn canonical_for(name: &str) -> String {
    for (canonical, aliases) in ALIAS_TABLE {
        if canonical.eq_ignore_ascii_case(name)
            || aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        {
            return (*canonical).to_string();
        }
    }
    name.to_string()
}
