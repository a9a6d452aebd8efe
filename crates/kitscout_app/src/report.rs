use kitscout_engine::RunOutcome;
use serde_json::json;

/// Text report, mirroring the flat vendor/analyte listing people pipe into
/// spreadsheets: a `=== MATCHED ===` section with one block per complete
/// vendor.
pub fn print_text(outcome: &RunOutcome) {
    let complete: Vec<_> = outcome.vendors.iter().filter(|v| v.complete).collect();
    if complete.is_empty() {
        println!("No complete vendor matches.");
    } else {
        println!("\n=== MATCHED ===");
        for vendor in &complete {
            println!("\n{}", vendor.vendor);
            for (analyte, url) in &vendor.matches {
                println!("  {analyte}: {url}");
            }
        }
    }
    let partial = outcome.vendors.len() - complete.len();
    if partial > 0 {
        println!("\n{partial} vendors matched only some analytes; use --json for details.");
    }
}

/// Full report as JSON, partial vendors included.
pub fn to_json(outcome: &RunOutcome) -> serde_json::Value {
    json!({
        "vendors": &outcome.vendors,
        "pages_fetched": outcome.pages_fetched,
        "elapsed_sec": outcome.elapsed.as_secs_f64(),
        "stop": outcome.stop.as_str(),
    })
}
