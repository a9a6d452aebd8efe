use std::collections::BTreeSet;

use crate::AnalyteGroup;

/// One search query targeting a single vendor and analyte.
///
/// Ephemeral: produced by the planner, consumed by the search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub vendor: String,
    pub canonical: String,
    pub text: String,
}

/// The `site:`-restricted product query for one vendor/analyte pair.
///
/// Pure function of its inputs; identical inputs always yield identical
/// query text.
pub fn site_query(vendor: &str, group: &AnalyteGroup, species: &str) -> PlannedQuery {
    let mut text = format!("site:{} {} ELISA kit", vendor, group.canonical());
    if !species.is_empty() {
        text.push(' ');
        text.push_str(species);
    }
    PlannedQuery {
        vendor: vendor.to_string(),
        canonical: group.canonical().to_string(),
        text,
    }
}

/// The unrestricted query used to discover candidate vendor domains.
pub fn discovery_query(group: &AnalyteGroup, species: &str) -> String {
    if species.is_empty() {
        format!("{} ELISA kit", group.canonical())
    } else {
        format!("{} {} ELISA kit", species, group.canonical())
    }
}

/// Site queries for every vendor x analyte pair, in vendor-major order.
pub fn plan_site_queries(
    vendors: &BTreeSet<String>,
    groups: &[AnalyteGroup],
    species: &str,
) -> Vec<PlannedQuery> {
    vendors
        .iter()
        .flat_map(|vendor| groups.iter().map(move |group| site_query(vendor, group, species)))
        .collect()
}
